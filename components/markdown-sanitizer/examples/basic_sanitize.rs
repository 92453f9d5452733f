//! Basic sanitization example demonstrating the markdown sanitizer

use markdown_sanitizer::sanitize;

fn main() {
    println!("=== Markdown Sanitizer - Basic Examples ===\n");

    // Example 1: Plain markdown
    show(
        "Example 1: Headings and emphasis",
        "# Seasonal influenza\n\nData for **H3N2** and *H1N1pdm*.",
    );

    // Example 2: Tables and code
    show(
        "Example 2: Tables and code",
        "| lineage | samples |\n|---|---|\n| H3N2 | 1200 |\n\n```\nauspice view\n```",
    );

    // Example 3: Inline SVG diagram
    show(
        "Example 3: Inline SVG",
        "<svg viewBox=\"0 0 10 10\"><circle cx=\"5\" cy=\"5\" r=\"4\" fill=\"steelblue\"/></svg>",
    );

    // Example 4: Script removal (security)
    show(
        "Example 4: Script removal",
        "Before\n\n<script>alert('xss')</script>\n\n<p onclick=\"steal()\">After</p>",
    );
}

fn show(title: &str, markdown: &str) {
    println!("{}", title);
    println!("Input markdown:");
    println!("{}\n", markdown);

    let html = sanitize(markdown);

    println!("Sanitized HTML:");
    println!("{}", html);
    println!("---\n");
}
