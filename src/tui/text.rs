//! Styled runs to display lines: newline splitting and wrapping to the viewport width.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::compose::{Run, RunStyle};
use crate::core::settings::{Palette, Rgb};

/// One logical line: its text and the byte ranges of each style.
#[derive(Default)]
struct StyledLine {
    text: String,
    spans: Vec<(usize, usize, RunStyle)>,
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub(crate) fn run_style(style: RunStyle, palette: &Palette) -> Style {
    match style {
        RunStyle::Plain => Style::default().fg(color(palette.body)),
        RunStyle::Emphasis => Style::default()
            .fg(color(palette.body))
            .add_modifier(Modifier::BOLD),
        RunStyle::Strong => Style::default()
            .fg(color(palette.heading))
            .add_modifier(Modifier::BOLD),
        RunStyle::Code => Style::default().fg(color(palette.subheading)),
    }
}

fn logical_lines(runs: &[Run]) -> Vec<StyledLine> {
    let mut lines = vec![StyledLine::default()];
    for run in runs {
        for (i, piece) in run.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(StyledLine::default());
            }
            let piece = piece.strip_suffix('\r').unwrap_or(piece).replace('\t', "    ");
            if piece.is_empty() {
                continue;
            }
            if let Some(line) = lines.last_mut() {
                let start = line.text.len();
                line.text.push_str(&piece);
                line.spans.push((start, line.text.len(), run.style));
            }
        }
    }
    lines
}

fn slice_line(line: &StyledLine, start: usize, end: usize, palette: &Palette) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .spans
        .iter()
        .filter_map(|&(s, e, style)| {
            let (a, b) = (s.max(start), e.min(end));
            (a < b).then(|| Span::styled(line.text[a..b].to_string(), run_style(style, palette)))
        })
        .collect();
    Line::from(spans)
}

/// Wrap one logical line with textwrap and map each wrapped chunk back to its styles.
fn wrap_line(line: &StyledLine, width: usize, palette: &Palette, out: &mut Vec<Line<'static>>) {
    if line.text.is_empty() {
        out.push(Line::default());
        return;
    }
    let mut pos = 0;
    for chunk in textwrap::wrap(&line.text, width.max(1)) {
        match line.text[pos..].find(chunk.as_ref()) {
            Some(offset) => {
                let start = pos + offset;
                let end = start + chunk.len();
                out.push(slice_line(line, start, end, palette));
                pos = end;
            }
            None => out.push(Line::styled(
                chunk.into_owned(),
                run_style(RunStyle::Plain, palette),
            )),
        }
    }
}

/// Display lines for `runs` at `width` columns.
pub(crate) fn layout(runs: &[Run], width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for line in logical_lines(runs) {
        wrap_line(&line, width, palette, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compose::bionic_runs;
    use crate::core::settings::ReadingSettings;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn palette() -> Palette {
        ReadingSettings::default().palette()
    }

    #[test]
    fn empty_runs_give_one_empty_line() {
        let lines = layout(&[], 80, &palette());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans.is_empty());
    }

    #[test]
    fn styles_survive_layout() {
        let p = palette();
        let lines = layout(&bionic_runs("Hello world!"), 80, &p);
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "Hello world!");
        assert_eq!(lines[0].spans[0].content, "Hel");
        assert_eq!(lines[0].spans[0].style, run_style(RunStyle::Emphasis, &p));
        assert_eq!(lines[0].spans[1].style, run_style(RunStyle::Plain, &p));
    }

    #[test]
    fn newlines_split_lines() {
        let runs = vec![Run {
            text: "one\r\n\ntwo".to_string(),
            style: RunStyle::Plain,
        }];
        let lines = layout(&runs, 80, &palette());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, ["one", "", "two"]);
    }

    #[test]
    fn long_lines_wrap_at_width() {
        let lines = layout(&bionic_runs("Hello world"), 5, &palette());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, ["Hello", "world"]);
        assert_eq!(lines[1].spans[0].content, "wor");
    }
}
