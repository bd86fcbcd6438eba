//! Message composition: decide per message how it is rendered and produce styled runs.
//!
//! Standard mode keeps the text as-is. Bionic mode splits markdown into segments,
//! strips the prose, and turns it into emphasized word prefixes; bold and code keep
//! their own styles.

use crate::core::bionic::process_bionic_text;
use crate::core::markdown::{Segment, Stripper, has_markdown_formatting, split_segments, strip_segments};
use crate::core::settings::FontMode;

/// Visual role of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    Plain,
    /// Bionic word prefix.
    Emphasis,
    /// Markdown bold (markers removed).
    Strong,
    Code,
}

/// Text with one style. Adjacent runs never share a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

fn push_run(runs: &mut Vec<Run>, text: &str, style: RunStyle) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => runs.push(Run {
            text: text.to_string(),
            style,
        }),
    }
}

fn push_bionic(runs: &mut Vec<Run>, text: &str) {
    for word in process_bionic_text(text).words {
        push_run(runs, word.bold, RunStyle::Emphasis);
        push_run(runs, word.normal, RunStyle::Plain);
    }
}

/// Runs for plain text in bionic mode.
pub fn bionic_runs(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    push_bionic(&mut runs, text);
    runs
}

/// Compose one message for display in `mode`.
pub async fn compose_message<S: Stripper>(text: &str, mode: FontMode, stripper: &S) -> Vec<Run> {
    let mut runs = Vec::new();
    if mode == FontMode::Standard {
        push_run(&mut runs, text, RunStyle::Plain);
        return runs;
    }
    if !has_markdown_formatting(text) {
        return bionic_runs(text);
    }
    let segments = split_segments(text);
    let parts = match strip_segments(&segments, stripper).await {
        Ok(parts) => parts,
        Err(e) => {
            log::warn!("Markdown stripping failed, rendering raw text: {}", e);
            return bionic_runs(text);
        }
    };
    for (segment, part) in segments.iter().zip(&parts) {
        match segment {
            Segment::Normal { .. } => push_bionic(&mut runs, part),
            Segment::Bold { content } => {
                let inner = content
                    .strip_prefix("**")
                    .and_then(|s| s.strip_suffix("**"))
                    .unwrap_or(content);
                push_run(&mut runs, inner, RunStyle::Strong);
            }
            Segment::Code { content, .. } => push_run(&mut runs, content, RunStyle::Code),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markdown::{MarkdownStripper, StripError};

    struct BrokenStripper;

    impl Stripper for BrokenStripper {
        async fn strip(&self, markdown: &str) -> Result<String, StripError> {
            Err(StripError::TooLarge {
                len: markdown.len(),
                max: 0,
            })
        }
    }

    fn run(text: &str, style: RunStyle) -> Run {
        Run {
            text: text.to_string(),
            style,
        }
    }

    #[tokio::test]
    async fn standard_mode_is_passthrough() {
        let runs =
            compose_message("**hi** there", FontMode::Standard, &MarkdownStripper::default())
                .await;
        assert_eq!(runs, [run("**hi** there", RunStyle::Plain)]);
    }

    #[tokio::test]
    async fn empty_message_has_no_runs() {
        let stripper = MarkdownStripper::default();
        assert!(compose_message("", FontMode::Standard, &stripper).await.is_empty());
        assert!(compose_message("", FontMode::Bionic, &stripper).await.is_empty());
    }

    #[test]
    fn bionic_runs_merge_spaces_into_plain() {
        assert_eq!(
            bionic_runs("Hello world!"),
            [
                run("Hel", RunStyle::Emphasis),
                run("lo ", RunStyle::Plain),
                run("wor", RunStyle::Emphasis),
                run("ld!", RunStyle::Plain),
            ]
        );
    }

    #[tokio::test]
    async fn bionic_mode_styles_bold_and_code() {
        let runs = compose_message(
            "# Read **this** `now`",
            FontMode::Bionic,
            &MarkdownStripper::default(),
        )
        .await;
        assert_eq!(
            runs,
            [
                run("Re", RunStyle::Emphasis),
                run("ad ", RunStyle::Plain),
                run("this", RunStyle::Strong),
                run(" ", RunStyle::Plain),
                run("`now`", RunStyle::Code),
            ]
        );
    }

    #[tokio::test]
    async fn stripping_failure_renders_raw_text() {
        let runs = compose_message("*a* bc", FontMode::Bionic, &BrokenStripper).await;
        assert_eq!(
            runs,
            [
                run("*", RunStyle::Plain),
                run("a", RunStyle::Emphasis),
                run("* ", RunStyle::Plain),
                run("b", RunStyle::Emphasis),
                run("c", RunStyle::Plain),
            ]
        );
    }
}
