//! Markdown rendering - the first, untrusted stage of the pipeline
//!
//! Markdown is rendered with pulldown-cmark. Raw HTML blocks and inline HTML
//! in the source are emitted verbatim, so the result is [`UntrustedHtml`] and
//! must go through the sanitizer before it is embedded anywhere.
//!
//! The defaults mirror GitHub-flavoured rendering: pipe tables and
//! `~~strikethrough~~` are on, and headings receive an `id` derived from
//! their text.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use std::sync::OnceLock;

use crate::html::UntrustedHtml;

/// Markdown rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// GFM pipe tables
    pub tables: bool,
    /// `~~text~~` rendered as `<del>`
    pub strikethrough: bool,
    /// Give every heading an `id` slug built from its text
    pub heading_ids: bool,
    /// Footnote references and definitions
    pub footnotes: bool,
    /// Curly quotes, dashes and ellipses
    pub smart_punctuation: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            heading_ids: true,
            footnotes: false,
            smart_punctuation: false,
        }
    }
}

impl RenderOptions {
    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

/// Render markdown to HTML without any filtering
///
/// # Examples
///
/// ```
/// use markdown_sanitizer::render::{render_markdown, RenderOptions};
///
/// let html = render_markdown("Hello **world**", &RenderOptions::default());
/// assert_eq!(html.as_str(), "<p>Hello <strong>world</strong></p>\n");
/// ```
pub fn render_markdown(markdown: &str, options: &RenderOptions) -> UntrustedHtml {
    let parser = Parser::new_ext(markdown, options.parser_options());

    let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
    if options.heading_ids {
        let events = attach_heading_ids(parser.collect());
        html::push_html(&mut output, events.into_iter());
    } else {
        html::push_html(&mut output, parser);
    }

    UntrustedHtml::new(output)
}

/// Fill in `id` on headings that do not carry one
fn attach_heading_ids(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut open: Option<(usize, String)> = None;

    for index in 0..events.len() {
        let finished = match &events[index] {
            Event::Start(Tag::Heading { id: None, .. }) => {
                open = Some((index, String::new()));
                None
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, title)) = open.as_mut() {
                    title.push_str(text);
                }
                None
            }
            Event::End(TagEnd::Heading(_)) => open.take(),
            _ => None,
        };

        if let Some((start, title)) = finished
            && let Event::Start(Tag::Heading { id, .. }) = &mut events[start]
        {
            *id = Some(CowStr::from(slugify(&title)));
        }
    }

    events
}

/// Lowercase the text and collapse each run of non-word characters to `-`
///
/// Word characters are ASCII letters, digits and underscore.
pub fn slugify(text: &str) -> String {
    static NON_WORD: OnceLock<Option<Regex>> = OnceLock::new();
    let lowered = text.to_lowercase();
    let Some(regex) = NON_WORD.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]+").ok()) else {
        return lowered;
    };
    regex.replace_all(&lowered, "-").into_owned()
}
