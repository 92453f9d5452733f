//! Security validation tests
//!
//! This suite feeds hostile markdown and raw HTML through the full pipeline
//! and checks that only allowlisted markup comes out.

mod common;

use common::{elements, tags};
use markdown_sanitizer::security::DEFAULT_MAX_DEPTH;
use markdown_sanitizer::{sanitize, sanitize_html};
use std::time::{Duration, Instant};

/// Generous bound for unoptimized builds; quadratic parsing of the inputs
/// below takes far longer
const DEEP_INPUT_BUDGET: Duration = Duration::from_secs(5);

/// Test that script blocks are removed with their content
#[test]
fn test_xss_script_tag_removal() {
    let markdown = "Before dangerous element\n\n<script>alert('xss')</script>\n\nAfter dangerous element";

    let html = sanitize(markdown);

    assert!(!html.as_str().contains("<script"));
    assert!(!html.as_str().contains("alert"));
    assert!(html.as_str().contains("Before dangerous element"));
    assert!(html.as_str().contains("After dangerous element"));
}

/// Test the literal payload from the published contract
#[test]
fn test_xss_literal_script_payload() {
    let html = sanitize("<script>alert(1)</script>");

    assert!(!tags(html.as_str()).iter().any(|t| t == "script"));
    assert!(!html.as_str().contains("alert(1)"));
}

/// Test that inline script tags inside a paragraph are removed
#[test]
fn test_xss_inline_script_removal() {
    let html = sanitize("Text <script>malicious()</script> more text");

    assert!(!html.as_str().contains("script"));
    assert!(!html.as_str().contains("malicious"));
    assert!(html.as_str().contains("Text"));
    assert!(html.as_str().contains("more text"));
}

/// Test that event handler attributes are removed
#[test]
fn test_xss_event_handler_removal() {
    let markdown = r#"<p onclick="alert('xss')">Click me</p>
<div onload="malicious()">Content</div>
<a href="test.html" onmouseover="attack()">Link</a>"#;

    let html = sanitize(markdown);
    let out = html.as_str();

    assert!(!out.contains("onclick"));
    assert!(!out.contains("onload"));
    assert!(!out.contains("onmouseover"));
    assert!(!out.contains("alert"));
    assert!(!out.contains("malicious"));
    assert!(!out.contains("attack"));

    assert!(out.contains("Click me"));
    assert!(out.contains("Content"));
    assert!(out.contains("<a href=\"test.html\">Link</a>"));
}

/// Attribute values are not inspected; `javascript:` links survive
#[test]
fn test_javascript_url_is_not_filtered() {
    let html = sanitize("[Click](javascript:alert(1))");
    assert!(html.as_str().contains("href=\"javascript:alert(1)\""));

    let raw = sanitize_html(r#"<img src="javascript:x()" alt="i">"#);
    assert!(raw.as_str().contains("src=\"javascript:x()\""));
}

/// Test that safe URLs are preserved
#[test]
fn test_safe_urls_preserved() {
    let markdown = "[a](https://example.com) [b](/relative/path) [c](#anchor) ![img](https://example.com/image.png)";

    let html = sanitize(markdown);
    let out = html.as_str();

    assert!(out.contains("href=\"https://example.com\""));
    assert!(out.contains("href=\"/relative/path\""));
    assert!(out.contains("href=\"#anchor\""));
    assert!(out.contains("src=\"https://example.com/image.png\""));
    assert!(out.contains("alt=\"img\""));
}

/// Test that style elements and style attributes are removed
#[test]
fn test_style_removal() {
    let markdown = "<style>body { background: url(x) }</style>\n\n<p style=\"color:red\">painted</p>";

    let html = sanitize(markdown);

    assert!(!html.as_str().contains("style"));
    assert!(!html.as_str().contains("background"));
    assert!(html.as_str().contains("<p>painted</p>"));
}

/// Test that embedding elements are removed
#[test]
fn test_embedding_elements_removed() {
    let markdown = r#"<iframe src="https://evil.example"></iframe>
<object data="evil.swf"><param name="x"></object>
<embed src="evil.swf">
<p>Safe content</p>"#;

    let html = sanitize(markdown);
    let out = html.as_str();

    assert!(!out.contains("iframe"));
    assert!(!out.contains("object"));
    assert!(!out.contains("embed"));
    assert!(!out.contains("evil"));
    assert!(out.contains("Safe content"));
}

/// Test that forms and inputs are removed
#[test]
fn test_form_controls_removed() {
    let html = sanitize_html(r#"<form action="/steal"><input name="q"><button>Go</button></form><p>x</p>"#);

    assert_eq!(tags(html.as_str()), ["p"]);
    assert!(!html.as_str().contains("Go"));
}

/// Test that foreignObject is removed from otherwise valid SVG
#[test]
fn test_svg_foreign_object_removed() {
    let html = sanitize(
        r#"<svg><foreignObject><div onclick="x()">inside</div></foreignObject><rect width="1"/></svg>"#,
    );
    let out = html.as_str();

    assert!(!out.contains("foreignObject"));
    assert!(!out.contains("inside"));
    assert!(out.contains("<svg><rect width=\"1\"></rect></svg>"));
}

/// Test that script inside SVG is removed
#[test]
fn test_svg_script_removed() {
    let html = sanitize_html(r#"<svg><script>alert(1)</script><circle r="2"/></svg>"#);

    assert_eq!(tags(html.as_str()), ["svg", "circle"]);
    assert!(!html.as_str().contains("alert"));
}

/// Test that SVG animation cannot smuggle event handlers
#[test]
fn test_svg_event_handlers_removed() {
    let html = sanitize_html(r#"<svg onload="x()"><animate onbegin="y()" attributeName="r" dur="1s"/></svg>"#);

    for element in elements(html.as_str()) {
        assert!(
            element.attributes.iter().all(|a| !a.starts_with("on")),
            "event handler survived on {element:?}"
        );
    }
    assert!(html.as_str().contains("attributeName=\"r\""));
}

/// Namespaced attributes are checked by their prefixed name
#[test]
fn test_xlink_href_removed() {
    let html = sanitize_html(r##"<svg><a xlink:href="#x" href="#y"><text>t</text></a></svg>"##);

    assert!(!html.as_str().contains("xlink"));
    assert!(html.as_str().contains("href=\"#y\""));
}

/// Test that disallowed elements take their whole subtree with them
#[test]
fn test_disallowed_subtree_removed() {
    let html = sanitize_html("<div><span>inner <em>text</em></span> outer</div>");

    assert_eq!(html.as_str(), "<div> outer</div>");
}

/// Markdown output outside the allowlist is dropped like any other markup
#[test]
fn test_markdown_constructs_outside_allowlist_dropped() {
    let html = sanitize("> quoted text\n\nkept");

    assert!(!html.as_str().contains("blockquote"));
    assert!(!html.as_str().contains("quoted text"));
    assert!(html.as_str().contains("<p>kept</p>"));
}

/// Test that comments never reach the output
#[test]
fn test_comments_removed() {
    let html = sanitize("<!-- secret -->\n\nvisible <!-- inline secret -->");

    assert!(!html.as_str().contains("secret"));
    assert!(!html.as_str().contains("<!--"));
    assert!(html.as_str().contains("visible"));
}

/// Test that escaped markup stays text
#[test]
fn test_escaped_markup_stays_text() {
    let html = sanitize("&lt;script&gt;alert(1)&lt;/script&gt; and a < b & c");
    let out = html.as_str();

    assert!(tags(out).iter().all(|t| t == "p"));
    assert!(out.contains("&lt;script&gt;"));
    assert!(out.contains("a &lt; b &amp; c"));
}

/// Test that table alignment styles are stripped but the table is kept
#[test]
fn test_table_alignment_style_stripped() {
    let html = sanitize("| name | count |\n|:----:|------:|\n| flu | 3 |");
    let found = tags(html.as_str());

    assert!(found.contains(&"table".to_string()));
    assert!(found.contains(&"th".to_string()));
    assert!(found.contains(&"td".to_string()));
    assert!(!html.as_str().contains("style"));
}

/// Test that deeply nested HTML is cut off at the depth limit
#[test]
fn test_deeply_nested_html() {
    let depth = DEFAULT_MAX_DEPTH * 2;
    let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));

    let output = sanitize_html(&html);

    assert!(tags(output.as_str()).len() <= DEFAULT_MAX_DEPTH);
    assert!(!output.as_str().contains("deep"));
}

/// Test that malformed markup degrades instead of failing
#[test]
fn test_malformed_markup() {
    let inputs = [
        "<div><p>unclosed <em>emphasis",
        "</div></p></em>",
        "<a href=\"unterminated>link</a>",
        "<<<>>>",
        "<svg><circle",
        "[broken](link",
        "```\nunterminated fence",
    ];

    for input in inputs {
        let html = sanitize(input);
        for tag in tags(html.as_str()) {
            assert!(!["script", "style", "span"].contains(&tag.as_str()));
        }
    }
}

/// Test that binary garbage is absorbed
#[test]
fn test_binary_garbage() {
    let input = "\u{0}\u{1}\u{FFFD}\u{7F}<\u{0}script>\u{200B}";
    let html = sanitize(input);

    assert!(!tags(html.as_str()).iter().any(|t| t == "script"));
}

/// Test multiple XSS vectors in one document
#[test]
fn test_multiple_xss_vectors() {
    let markdown = r#"# Dataset

<script>alert('1')</script>
<img src="x.png" onerror="alert('2')">
<div style="background:url(javascript:alert('3'))">text</div>
<svg><foreignObject><script>alert('4')</script></foreignObject></svg>
<iframe srcdoc="<script>alert('5')</script>"></iframe>"#;

    let html = sanitize(markdown);
    let out = html.as_str();

    assert!(!out.contains("alert"));
    assert!(!out.contains("onerror"));
    assert!(!out.contains("style"));
    assert!(!out.contains("srcdoc"));
    assert!(out.contains("<h1 id=\"dataset\">Dataset</h1>"));
    assert!(out.contains("<img src=\"x.png\">"));
}

/// Test that inline SVG keeps its elements and attributes unchanged
#[test]
fn test_svg_passthrough() {
    let html = sanitize(r#"<svg><circle cx="1" cy="1" r="1" fill="red"/></svg>"#);

    assert!(
        html.as_str()
            .contains(r#"<svg><circle cx="1" cy="1" r="1" fill="red"></circle></svg>"#)
    );
    let found = elements(html.as_str());
    let circle = found.iter().find(|e| e.tag == "circle").expect("circle kept");
    assert_eq!(circle.attributes, ["cx", "cy", "r", "fill"]);
}

/// Test that plain markdown renders as expected
#[test]
fn test_plain_text_roundtrip() {
    let html = sanitize("Hello **world**");

    assert!(html.as_str().contains("<strong>world</strong>"));
    assert!(html.as_str().contains("Hello"));
}

/// Test that empty input yields blank output
#[test]
fn test_empty_input() {
    assert!(sanitize("").is_blank());
    assert!(sanitize_html("").is_blank());
    assert!(sanitize("   \n\n").is_blank());
}

/// Sanitizing already sanitized output changes nothing
#[test]
fn test_sanitized_output_is_stable() {
    let markdown = "# Title\n\nHello **world**, see [docs](https://example.com).\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n<svg viewBox=\"0 0 2 2\"><rect width=\"1\" onclick=\"x()\"/></svg>";

    let once = sanitize(markdown);
    let again = sanitize_html(once.as_str());

    assert_eq!(once, again);
}

/// Running sanitized output back through the whole pipeline changes nothing
///
/// Rendered markdown without blank lines inside blocks reads back as one raw
/// HTML block. A fenced code block holding a blank line inside a list item
/// does not: the blank line ends the HTML block and the rest is parsed as
/// markdown again.
#[test]
fn test_full_pipeline_idempotent() {
    let markdown = "# Dataset\n\nSome *text* and `code`.\n\n- one\n- two\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n```\nlet x = 1;\n```\n\n<svg viewBox=\"0 0 2 2\"><circle r=\"1\"/></svg>";

    let once = sanitize(markdown);
    let twice = sanitize(once.as_str());

    assert_eq!(once, twice);
}

/// Deeply nested markdown lists finish in time proportional to their length
#[test]
fn test_deep_markdown_lists_bounded() {
    let markdown = format!("{}x", "- ".repeat(20_000));

    let start = Instant::now();
    let html = sanitize(&markdown);

    assert!(start.elapsed() < DEEP_INPUT_BUDGET, "took {:?}", start.elapsed());
    assert!(tags(html.as_str()).len() <= DEFAULT_MAX_DEPTH);
}

/// Deeply nested blockquotes finish in time proportional to their length
#[test]
fn test_deep_blockquotes_bounded() {
    let markdown = format!("{}x", ">".repeat(20_000));

    let start = Instant::now();
    let _ = sanitize(&markdown);

    assert!(start.elapsed() < DEEP_INPUT_BUDGET, "took {:?}", start.elapsed());
}

/// Deeply nested raw HTML finishes in time proportional to its length
#[test]
fn test_deep_raw_html_bounded() {
    let html = "<div>".repeat(20_000);

    let start = Instant::now();
    let output = sanitize_html(&html);

    assert!(start.elapsed() < DEEP_INPUT_BUDGET, "took {:?}", start.elapsed());
    assert_eq!(output.as_str().matches("<div>").count(), DEFAULT_MAX_DEPTH);
}
