//! TUI reader: a scrollable view of one document with a standard/bionic toggle.

mod constants;
mod reader;
mod text;

use std::io;

use crossterm::event::{self, Event};
use crossterm::execute;

use crate::core::compose::Run;
use crate::core::settings::{FontMode, Palette};

use reader::{HandleResult, Reader};

/// A document composed in both font modes, so toggling never re-runs the pipeline.
pub struct Document {
    pub title: String,
    pub standard: Vec<Run>,
    pub bionic: Vec<Run>,
    pub palette: Palette,
}

impl Document {
    fn runs(&self, mode: FontMode) -> &[Run] {
        match mode {
            FontMode::Standard => &self.standard,
            FontMode::Bionic => &self.bionic,
        }
    }
}

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::cursor::Show;
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, Show);
    }
}

/// Run the reader loop. Returns the font mode active when the user quit.
pub fn run(doc: Document, mode: FontMode) -> io::Result<FontMode> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut reader = Reader::new(mode);
    loop {
        terminal.draw(|f| reader.draw(f, &doc))?;

        if event::poll(std::time::Duration::from_millis(
            constants::EVENT_POLL_TIMEOUT_MS,
        ))? && let Event::Key(key) = event::read()?
            && reader.handle_key(key) == HandleResult::Break
        {
            break;
        }
    }

    terminal.show_cursor()?;
    Ok(reader.mode)
}
