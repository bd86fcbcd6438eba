//! Reader state: key handling, scrolling, and drawing one document.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::settings::FontMode;

use super::Document;
use super::constants::{ACCENT, HINT, KEY_HINTS, SCROLL_LINES_PAGE, SCROLL_LINES_SMALL};
use super::text;

/// Result of handling a key: continue the loop or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HandleResult {
    Continue,
    Break,
}

pub(crate) struct Reader {
    pub mode: FontMode,
    pub scroll: usize,
    /// Largest valid scroll offset, known after the last draw.
    max_scroll: usize,
    /// Laid-out lines for (mode, width).
    cache: Option<(FontMode, usize, Vec<Line<'static>>)>,
}

impl Reader {
    pub fn new(mode: FontMode) -> Self {
        Self {
            mode,
            scroll: 0,
            max_scroll: usize::MAX,
            cache: None,
        }
    }

    fn scroll_down(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_add(n).min(self.max_scroll);
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> HandleResult {
        if key.kind != KeyEventKind::Press {
            return HandleResult::Continue;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return HandleResult::Break;
            }
            KeyCode::Char('q') | KeyCode::Esc => return HandleResult::Break,
            KeyCode::Char('b') | KeyCode::Tab => {
                self.mode = self.mode.toggled();
                self.scroll = 0;
                self.max_scroll = usize::MAX;
                log::debug!("Reader switched to {} mode", self.mode);
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(SCROLL_LINES_SMALL),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(SCROLL_LINES_SMALL),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_down(SCROLL_LINES_PAGE),
            KeyCode::PageUp => self.scroll_up(SCROLL_LINES_PAGE),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = self.max_scroll,
            _ => {}
        }
        HandleResult::Continue
    }

    fn lines(&mut self, doc: &Document, width: usize) -> &[Line<'static>] {
        let stale = !matches!(&self.cache, Some((m, w, _)) if *m == self.mode && *w == width);
        if stale {
            let lines = text::layout(doc.runs(self.mode), width, &doc.palette);
            self.cache = Some((self.mode, width, lines));
        }
        match &self.cache {
            Some((_, _, lines)) => lines.as_slice(),
            None => &[],
        }
    }

    pub fn draw(&mut self, f: &mut Frame, doc: &Document) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());
        let body = chunks[1];
        let height = usize::from(body.height);

        let mode = self.mode;
        let total = self.lines(doc, usize::from(body.width)).len();
        self.max_scroll = total.saturating_sub(height);
        self.scroll = self.scroll.min(self.max_scroll);
        let scroll = self.scroll;

        let header = Line::from(vec![
            Span::styled(
                doc.title.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  [{}]", mode), Style::default().fg(HINT)),
        ]);
        f.render_widget(Paragraph::new(header), chunks[0]);

        let visible: Vec<Line<'static>> = self
            .lines(doc, usize::from(body.width))
            .iter()
            .skip(scroll)
            .take(height)
            .cloned()
            .collect();
        f.render_widget(Paragraph::new(visible), body);

        let progress = if self.max_scroll == 0 {
            100
        } else {
            scroll * 100 / self.max_scroll
        };
        let footer = Line::from(vec![
            Span::styled(KEY_HINTS, Style::default().fg(HINT)),
            Span::styled(format!("  {}%", progress), Style::default().fg(ACCENT)),
        ]);
        f.render_widget(Paragraph::new(footer), chunks[2]);
    }
}
