//! Terminal output: composed runs rendered with ANSI colours.

use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};

use crate::core::compose::{Run, RunStyle};
use crate::core::settings::{Palette, Rgb};

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Render runs for a terminal. Without a palette the text is returned unstyled.
pub fn render_runs(runs: &[Run], palette: Option<&Palette>) -> String {
    let Some(palette) = palette else {
        return runs.iter().map(|r| r.text.as_str()).collect();
    };
    let mut out = String::new();
    for run in runs {
        let text = run.text.as_str();
        let _ = match run.style {
            RunStyle::Plain => write!(out, "{}", text.with(color(palette.body))),
            RunStyle::Emphasis => write!(out, "{}", text.with(color(palette.body)).bold()),
            RunStyle::Strong => write!(out, "{}", text.with(color(palette.heading)).bold()),
            RunStyle::Code => write!(out, "{}", text.with(color(palette.subheading))),
        };
    }
    out
}

/// Render runs as plain text with emphasized and strong runs wrapped in `**`, so the
/// bionic split stays visible without colour.
pub fn render_marked(runs: &[Run]) -> String {
    let mut out = String::new();
    for run in runs {
        match run.style {
            RunStyle::Emphasis | RunStyle::Strong => {
                out.push_str("**");
                out.push_str(&run.text);
                out.push_str("**");
            }
            RunStyle::Plain | RunStyle::Code => out.push_str(&run.text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::ReadingSettings;

    fn runs() -> Vec<Run> {
        vec![
            Run {
                text: "Hel".to_string(),
                style: RunStyle::Emphasis,
            },
            Run {
                text: "lo ".to_string(),
                style: RunStyle::Plain,
            },
            Run {
                text: "bold".to_string(),
                style: RunStyle::Strong,
            },
        ]
    }

    #[test]
    fn unstyled_without_palette() {
        assert_eq!(render_runs(&runs(), None), "Hello bold");
        assert_eq!(render_runs(&[], None), "");
    }

    #[test]
    fn marked_output_wraps_emphasis() {
        assert_eq!(render_marked(&runs()), "**Hel**lo **bold**");
        assert_eq!(render_marked(&[]), "");
    }

    #[test]
    fn styled_output_uses_palette_colors() {
        let palette = ReadingSettings::default().palette();
        let out = render_runs(&runs(), Some(&palette));
        assert!(out.contains("Hel"));
        assert!(out.contains("bold"));
        // heading #06b6d4 on the strong run, body #e2e8f0 on prose
        assert!(out.contains("38;2;6;182;212"));
        assert!(out.contains("38;2;226;232;240"));
        assert!(out.contains('\u{1b}'));
    }
}
