//! Message segmentation: bold spans, code spans and the prose between them.
//!
//! Code is located first (fenced blocks, then inline spans between them) and is
//! opaque to the bold scan, so `**` inside code never opens or closes bold text.
//! Segments borrow from the input and concatenate back to it exactly.

use serde::Serialize;

const FENCE: &str = "```";
const BOLD: &str = "**";

/// Segment of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Segment<'a> {
    /// Prose, candidate for markdown stripping and bionic processing.
    Normal { content: &'a str },
    /// `**text**`, markers included. May contain inline code.
    Bold { content: &'a str },
    /// Fenced block or inline span, verbatim with its backticks.
    Code {
        content: &'a str,
        fenced: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<&'a str>,
    },
}

impl<'a> Segment<'a> {
    pub fn content(&self) -> &'a str {
        match *self {
            Segment::Normal { content }
            | Segment::Bold { content }
            | Segment::Code { content, .. } => content,
        }
    }
}

/// Byte range of a code span in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CodeSpan {
    start: usize,
    end: usize,
    fenced: bool,
}

/// End of a fenced block opening at `start`: optional `[A-Za-z0-9_]*` tag, a newline,
/// then everything up to and including the next fence.
fn fence_end(text: &str, start: usize) -> Option<usize> {
    let after = &text[start + FENCE.len()..];
    let tag_len = after
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if after.as_bytes().get(tag_len) != Some(&b'\n') {
        return None;
    }
    let body = start + FENCE.len() + tag_len + 1;
    text[body..]
        .find(FENCE)
        .map(|rel| body + rel + FENCE.len())
}

fn fenced_blocks(text: &str) -> Vec<CodeSpan> {
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(rel) = text[from..].find(FENCE) {
        let start = from + rel;
        match fence_end(text, start) {
            Some(end) => {
                spans.push(CodeSpan {
                    start,
                    end,
                    fenced: true,
                });
                from = end;
            }
            None => from = start + 1,
        }
    }
    spans
}

/// Inline spans (`` `x` ``, at least one non-backtick char) within `text[start..end]`.
fn inline_spans(text: &str, start: usize, end: usize, out: &mut Vec<CodeSpan>) {
    let gap = &text[start..end];
    let mut from = 0;
    while let Some(rel) = gap[from..].find('`') {
        let open = from + rel;
        match gap[open + 1..].find('`') {
            // "``": retry from the second backtick
            Some(0) => from = open + 1,
            Some(len) => {
                let close = open + 1 + len + 1;
                out.push(CodeSpan {
                    start: start + open,
                    end: start + close,
                    fenced: false,
                });
                from = close;
            }
            None => break,
        }
    }
}

/// All code spans in document order. Inline spans never cross a fenced block.
fn code_spans(text: &str) -> Vec<CodeSpan> {
    let mut spans = Vec::new();
    let mut gap_start = 0;
    for block in fenced_blocks(text) {
        inline_spans(text, gap_start, block.start, &mut spans);
        spans.push(block);
        gap_start = block.end;
    }
    inline_spans(text, gap_start, text.len(), &mut spans);
    spans
}

/// End of the code span covering `pos`, if any.
fn protected_end(spans: &[CodeSpan], pos: usize) -> Option<usize> {
    let idx = spans.partition_point(|s| s.end <= pos);
    spans.get(idx).filter(|s| s.start <= pos).map(|s| s.end)
}

/// Next `**` at or after `pos` that is not inside code.
fn find_opener(text: &str, spans: &[CodeSpan], mut pos: usize) -> Option<usize> {
    loop {
        let open = pos + text[pos..].find(BOLD)?;
        match protected_end(spans, open) {
            Some(end) => pos = end,
            None => return Some(open),
        }
    }
}

/// End of the closing `**` after `from`, skipping code. A line break outside code fails.
fn find_closer(bytes: &[u8], spans: &[CodeSpan], from: usize) -> Option<usize> {
    let mut pos = from;
    while pos < bytes.len() {
        if let Some(end) = protected_end(spans, pos) {
            pos = end;
            continue;
        }
        match bytes[pos] {
            b'\n' | b'\r' => return None,
            b'*' if bytes.get(pos + 1) == Some(&b'*') => return Some(pos + 2),
            _ => pos += 1,
        }
    }
    None
}

/// Leftmost bold span starting at or after `from`.
fn find_bold(text: &str, spans: &[CodeSpan], from: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    loop {
        let open = find_opener(text, spans, pos)?;
        match find_closer(text.as_bytes(), spans, open + BOLD.len()) {
            Some(end) => return Some((open, end)),
            None => pos = open + 1,
        }
    }
}

fn code_segment(text: &str, span: CodeSpan) -> Segment<'_> {
    let content = &text[span.start..span.end];
    let lang = if span.fenced {
        content[FENCE.len()..]
            .split('\n')
            .next()
            .filter(|tag| !tag.is_empty())
    } else {
        None
    };
    Segment::Code {
        content,
        fenced: span.fenced,
        lang,
    }
}

fn push_normal<'a>(text: &'a str, start: usize, end: usize, out: &mut Vec<Segment<'a>>) {
    if start < end {
        out.push(Segment::Normal {
            content: &text[start..end],
        });
    }
}

/// Emit `text[start..end]` as normal segments around the code spans it contains.
fn push_prose<'a>(
    text: &'a str,
    spans: &[CodeSpan],
    start: usize,
    end: usize,
    out: &mut Vec<Segment<'a>>,
) {
    let mut pos = start;
    for span in spans
        .iter()
        .skip_while(|s| s.start < start)
        .take_while(|s| s.end <= end)
    {
        push_normal(text, pos, span.start, out);
        out.push(code_segment(text, *span));
        pos = span.end;
    }
    push_normal(text, pos, end, out);
}

/// Split markdown into normal, bold and code segments, in order.
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let spans = code_spans(text);
    let mut segments = Vec::new();
    let mut cursor = 0;
    while let Some((start, end)) = find_bold(text, &spans, cursor) {
        push_prose(text, &spans, cursor, start, &mut segments);
        segments.push(Segment::Bold {
            content: &text[start..end],
        });
        cursor = end;
    }
    push_prose(text, &spans, cursor, text.len(), &mut segments);
    log::debug!(
        "Split {} bytes into {} segments ({} code spans)",
        text.len(),
        segments.len(),
        spans.len()
    );
    segments
}

/// Split markdown into prose and fenced code blocks only.
pub fn split_code_blocks(text: &str) -> Vec<Segment<'_>> {
    let blocks = fenced_blocks(text);
    let mut segments = Vec::new();
    push_prose(text, &blocks, 0, text.len(), &mut segments);
    segments
}
