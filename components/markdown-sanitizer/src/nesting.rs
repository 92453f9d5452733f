//! Nesting limit applied before tree construction
//!
//! html5ever's tree builder scans its stack of open elements for most start
//! tags, so building a tree from input nested `n` levels deep costs `O(n²)`.
//! [`cap_nesting`] runs the tokenizer alone over the untrusted HTML. When the
//! open-tag depth passes the limit, it rebuilds the markup without the
//! elements nested beyond it. Input that stays within the limit is returned
//! untouched.
//!
//! The depth tracked here follows tags as written, with the common implied
//! end tags applied (`<p>` before a block, `<li>` before `<li>`, table cells).
//! It can differ from the depth html5ever ends up building.
//! [`crate::security::TreeFilter`] still enforces the exact limit on the tree.

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::LocalName;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer,
};
use tracing::debug;

/// Elements that never hold children in the HTML namespace
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "image", "img",
    "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Tags the tree builder ignores inside a `<body>` fragment
const IGNORED_IN_BODY: &[&str] = &["html", "head", "body"];

/// Start tags that close an open `<p>`
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "dd", "details", "dialog", "dir",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "li", "listing", "main", "menu", "nav", "ol",
    "p", "pre", "search", "section", "summary", "table", "ul", "xmp",
];

/// Start tags that close an open element of the same name
const CLOSES_SAME: &[&str] = &["li", "dt", "dd", "option", "tr", "td", "th"];

/// Foreign elements whose children follow HTML rules again
const HTML_INTEGRATION_POINTS: &[&str] = &[
    "foreignobject", "desc", "title", "mi", "mo", "mn", "ms", "mtext", "annotation-xml",
];

/// Untrusted HTML with excess nesting cut away
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedHtml<'a> {
    /// The markup to parse
    pub html: Cow<'a, str>,
    /// Subtrees dropped because they started beyond the limit
    pub cut_subtrees: usize,
}

/// Drop elements nested deeper than `max_depth`, along with their content
///
/// # Examples
///
/// ```
/// use markdown_sanitizer::nesting::cap_nesting;
///
/// let capped = cap_nesting("<div><div><div>deep</div></div></div>", 2);
/// assert_eq!(capped.html, "<div><div></div></div>");
/// assert_eq!(capped.cut_subtrees, 1);
///
/// let shallow = cap_nesting("<p>kept <em>as is</em></p>", 2);
/// assert_eq!(shallow.html, "<p>kept <em>as is</em></p>");
/// ```
pub fn cap_nesting(html: &str, max_depth: usize) -> CappedHtml<'_> {
    // Every element needs a `<`, so short markup cannot reach the limit
    if html.bytes().filter(|&b| b == b'<').count() <= max_depth {
        return CappedHtml {
            html: Cow::Borrowed(html),
            cut_subtrees: 0,
        };
    }

    let tokenizer = Tokenizer::new(NestingSink::new(max_depth), Default::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let state = tokenizer.sink.state.into_inner();
    if state.cut_subtrees == 0 {
        return CappedHtml {
            html: Cow::Borrowed(html),
            cut_subtrees: 0,
        };
    }

    debug!(
        max_depth,
        cut_subtrees = state.cut_subtrees,
        input_len = html.len(),
        output_len = state.out.len(),
        "cut nesting before tree construction"
    );
    CappedHtml {
        html: Cow::Owned(state.out),
        cut_subtrees: state.cut_subtrees,
    }
}

struct OpenElement {
    name: LocalName,
    foreign: bool,
}

#[derive(Default)]
struct NestingState {
    out: String,
    stack: Vec<OpenElement>,
    /// Open elements inside the subtree currently being dropped
    skipping: usize,
    raw_text: bool,
    plaintext: bool,
    cut_subtrees: usize,
}

struct NestingSink {
    max_depth: usize,
    state: RefCell<NestingState>,
}

impl NestingSink {
    fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            state: RefCell::new(NestingState::default()),
        }
    }
}

impl TokenSink for NestingSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return state.start_tag(&tag, self.max_depth),
                TagKind::EndTag => state.end_tag(&tag),
            },
            Token::CharacterTokens(text) => state.text(&text),
            Token::NullCharacterToken => state.null_character(),
            // Comments and doctypes never survive the allowlist
            _ => {}
        }
        TokenSinkResult::Continue
    }

    fn adjusted_current_node_present_but_not_in_html_namespace(&self) -> bool {
        self.state
            .borrow()
            .stack
            .last()
            .is_some_and(|element| element.foreign)
    }
}

impl NestingState {
    /// True when the current node's children are parsed as foreign content
    fn in_foreign_content(&self) -> bool {
        self.stack.last().is_some_and(|element| {
            element.foreign && !HTML_INTEGRATION_POINTS.contains(&element.name.as_ref())
        })
    }

    fn top_is(&self, name: &str) -> bool {
        self.stack
            .last()
            .is_some_and(|element| element.name.as_ref() == name)
    }

    fn start_tag(&mut self, tag: &Tag, max_depth: usize) -> TokenSinkResult<()> {
        let name: &str = tag.name.as_ref();
        let foreign_parent = self.in_foreign_content();
        let starts_foreign = name == "svg" || name == "math";
        let opens = !VOID_ELEMENTS.contains(&name)
            && !IGNORED_IN_BODY.contains(&name)
            && !(tag.self_closing && (foreign_parent || starts_foreign));
        let switch = if foreign_parent {
            TokenSinkResult::Continue
        } else {
            text_mode(name)
        };

        if self.skipping > 0 {
            if opens {
                self.skipping += 1;
            }
            return self.enter(switch);
        }

        if opens {
            if !foreign_parent {
                self.close_implied(name);
            }
            if self.stack.len() >= max_depth {
                self.skipping = 1;
                self.cut_subtrees += 1;
                return self.enter(switch);
            }
        }

        write_start_tag(&mut self.out, tag);
        if opens {
            self.stack.push(OpenElement {
                name: tag.name.clone(),
                foreign: starts_foreign || foreign_parent,
            });
        }
        self.enter(switch)
    }

    fn end_tag(&mut self, tag: &Tag) {
        self.raw_text = false;
        if self.skipping > 0 {
            self.skipping -= 1;
            return;
        }
        if IGNORED_IN_BODY.contains(&tag.name.as_ref()) {
            return;
        }

        if let Some(pos) = self.stack.iter().rposition(|element| element.name == tag.name) {
            self.stack.truncate(pos);
        }
        self.out.push_str("</");
        self.out.push_str(&tag.name);
        self.out.push('>');
    }

    fn text(&mut self, text: &str) {
        if self.skipping > 0 {
            return;
        }
        if self.raw_text || self.plaintext {
            self.out.push_str(text);
        } else {
            escape_into(&mut self.out, text, false);
        }
    }

    fn null_character(&mut self) {
        if self.skipping == 0 && self.in_foreign_content() {
            self.out.push('\u{FFFD}');
        }
    }

    fn close_implied(&mut self, name: &str) {
        if CLOSES_PARAGRAPH.contains(&name) && self.top_is("p") {
            self.stack.pop();
        }
        if CLOSES_SAME.contains(&name) && self.top_is(name) {
            self.stack.pop();
        }
    }

    /// Track the tokenizer state the tree builder would switch to
    fn enter(&mut self, switch: TokenSinkResult<()>) -> TokenSinkResult<()> {
        match switch {
            TokenSinkResult::Plaintext => self.plaintext = true,
            TokenSinkResult::RawData(RawKind::Rawtext | RawKind::ScriptData) => {
                self.raw_text = true
            }
            _ => {}
        }
        switch
    }
}

/// Tokenizer state for the content of an HTML element
fn text_mode(name: &str) -> TokenSinkResult<()> {
    match name {
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}

fn write_start_tag(out: &mut String, tag: &Tag) {
    out.push('<');
    out.push_str(&tag.name);
    for attr in &tag.attrs {
        out.push(' ');
        out.push_str(&attr.name.local);
        out.push_str("=\"");
        escape_into(out, &attr.value, true);
        out.push('"');
    }
    if tag.self_closing {
        out.push('/');
    }
    out.push('>');
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
