//! Markdown handling for bionic reading: segmentation, stripping, detection.
//!
//! Bold and code segments are passed through verbatim so a markdown renderer can
//! still style them; only the prose between them is stripped to plain text.

mod segments;
mod strip;

use std::sync::OnceLock;

use futures::future::try_join_all;
use regex::Regex;

pub use segments::{Segment, split_code_blocks, split_segments};
pub use strip::{DEFAULT_MAX_INPUT_BYTES, MarkdownStripper, StripError, Stripper};

static MARKDOWN_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn markdown_patterns() -> &'static [Regex] {
    MARKDOWN_PATTERNS.get_or_init(|| {
        [
            r"\*\*.*?\*\*",         // bold
            r"\*.*?\*",             // italic
            r"`.*?`",               // inline code
            r"(?m)^#{1,6}\s",       // headers
            r"(?m)^\s*[-*+]\s",     // lists
            r"\[.*?\]\(.*?\)",      // links
        ]
        .iter()
        .map(|p| Regex::new(p).expect("built-in markdown pattern must compile"))
        .collect()
    })
}

/// Returns true if the text contains bold, italic, inline code, headers, lists or links.
pub fn has_markdown_formatting(text: &str) -> bool {
    markdown_patterns().iter().any(|re| re.is_match(text))
}

/// Strip one prose segment, keeping its surrounding whitespace so it does not fuse
/// with its neighbours. Blank segments are returned as-is.
async fn strip_prose<S: Stripper>(content: &str, stripper: &S) -> Result<String, StripError> {
    let core = content.trim();
    if core.is_empty() {
        return Ok(content.to_string());
    }
    let lead = &content[..content.len() - content.trim_start().len()];
    let trail = &content[content.trim_end().len()..];
    let stripped = stripper.strip(core).await?;
    Ok(format!("{lead}{stripped}{trail}"))
}

/// Stripped text per segment, in segment order: normal segments go through the
/// stripper concurrently, bold and code are copied verbatim.
pub async fn strip_segments<S: Stripper>(
    segments: &[Segment<'_>],
    stripper: &S,
) -> Result<Vec<String>, StripError> {
    try_join_all(segments.iter().map(|segment| async move {
        match segment {
            Segment::Normal { content } => strip_prose(content, stripper).await,
            other => Ok(other.content().to_string()),
        }
    }))
    .await
}

/// Strip markdown from prose while preserving `**bold**` and code verbatim.
/// Never fails: on any stripping error the input is returned unchanged.
pub async fn process_for_bionic_reading<S: Stripper>(markdown: &str, stripper: &S) -> String {
    let segments = split_segments(markdown);
    match strip_segments(&segments, stripper).await {
        Ok(parts) => parts.concat(),
        Err(e) => {
            log::error!("Error processing text for bionic reading: {}", e);
            markdown.to_string()
        }
    }
}

/// Strip markdown everywhere except fenced code blocks.
/// Never fails: on any stripping error the input is returned unchanged.
pub async fn clean_markdown_text<S: Stripper>(markdown: &str, stripper: &S) -> String {
    let segments = split_code_blocks(markdown);
    match strip_segments(&segments, stripper).await {
        Ok(parts) => parts.concat(),
        Err(e) => {
            log::error!("Error cleaning markdown: {}", e);
            markdown.to_string()
        }
    }
}
