//! Shows what the sanitizer removed from a hostile dataset description
//!
//! Run with: cargo run --example sanitize_report

use markdown_sanitizer::MarkdownSanitizer;

fn main() {
    let description = r#"## Dataset notes

<img src="tree.png" alt="Phylogeny" onerror="alert(1)">

<svg><foreignObject><iframe src="https://evil.example"></iframe></foreignObject>
<rect width="4" height="2" style="fill:red"/></svg>

<!-- internal reviewer comment -->
"#;

    let sanitizer = MarkdownSanitizer::new();
    let (html, report) = sanitizer.sanitize_with_report(description);

    println!("Sanitized HTML:");
    println!("{}", html);
    println!("Removed elements:   {}", report.removed_elements);
    println!("Removed attributes: {}", report.removed_attributes);
    println!("Removed other nodes: {}", report.removed_nodes);
    println!("Depth-limited:      {}", report.depth_limited);
    println!("Input already clean: {}", report.is_clean());
}
