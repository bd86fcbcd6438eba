//! Markdown stripping: turn markdown prose into plain text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Default input limit for [`MarkdownStripper`] (2MB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 2 * 1024 * 1024;

/// Errors from a stripping pass.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    #[error("input too large to strip ({len} bytes, max {max})")]
    TooLarge { len: usize, max: usize },
}

/// Removes markdown syntax from prose. One call per normal segment.
pub trait Stripper {
    async fn strip(&self, markdown: &str) -> Result<String, StripError>;
}

/// CommonMark stripper: keeps text and inline code, drops markup, code blocks and HTML.
#[derive(Debug, Clone)]
pub struct MarkdownStripper {
    max_input_bytes: usize,
}

impl MarkdownStripper {
    pub fn new(max_input_bytes: usize) -> Self {
        Self { max_input_bytes }
    }
}

impl Default for MarkdownStripper {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_BYTES)
    }
}

impl Stripper for MarkdownStripper {
    async fn strip(&self, markdown: &str) -> Result<String, StripError> {
        if markdown.len() > self.max_input_bytes {
            return Err(StripError::TooLarge {
                len: markdown.len(),
                max: self.max_input_bytes,
            });
        }
        Ok(strip_markdown(markdown))
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Separator owed before the next piece of text. Larger gaps win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Gap {
    None,
    Space,
    Line,
    Paragraph,
}

/// Plain-text sink for parser events.
struct PlainText {
    out: String,
    gap: Gap,
    /// Depth of blocks whose content is dropped (code, HTML, footnote definitions).
    skip: usize,
    lists: usize,
}

impl PlainText {
    fn new(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            gap: Gap::None,
            skip: 0,
            lists: 0,
        }
    }

    fn gap(&mut self, gap: Gap) {
        self.gap = self.gap.max(gap);
    }

    fn push(&mut self, text: &str) {
        if self.skip > 0 || text.is_empty() {
            return;
        }
        if !self.out.is_empty() {
            match self.gap {
                Gap::None => {}
                Gap::Space => self.out.push(' '),
                Gap::Line => self.out.push('\n'),
                Gap::Paragraph => self.out.push_str("\n\n"),
            }
        }
        self.gap = Gap::None;
        self.out.push_str(text);
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Text(text) | Event::Code(text) => self.push(&text),
            Event::SoftBreak | Event::HardBreak => self.gap(Gap::Line),
            Event::Rule => self.gap(Gap::Paragraph),
            Event::Start(Tag::CodeBlock(_) | Tag::HtmlBlock | Tag::FootnoteDefinition(_)) => {
                self.gap(Gap::Paragraph);
                self.skip += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::HtmlBlock | TagEnd::FootnoteDefinition) => {
                self.skip = self.skip.saturating_sub(1);
                self.gap(Gap::Paragraph);
            }
            Event::Start(Tag::List(_)) => {
                self.lists += 1;
                self.gap(Gap::Line);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists = self.lists.saturating_sub(1);
                self.gap(if self.lists == 0 {
                    Gap::Paragraph
                } else {
                    Gap::Line
                });
            }
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::BlockQuote(_) | TagEnd::Table,
            ) => self.gap(Gap::Paragraph),
            Event::End(TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow) => {
                self.gap(Gap::Line)
            }
            Event::End(TagEnd::TableCell) => self.gap(Gap::Space),
            // Inline HTML, task markers, footnote references
            _ => {}
        }
    }
}

/// Strip markdown syntax from `markdown`, keeping the prose. Code blocks, HTML, thematic
/// breaks and link definitions are dropped; the result is trimmed.
pub(crate) fn strip_markdown(markdown: &str) -> String {
    let mut plain = PlainText::new(markdown.len());
    for event in Parser::new_ext(markdown, options()) {
        plain.handle_event(event);
    }
    plain.out.trim().to_string()
}
