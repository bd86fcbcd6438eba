//! TUI constants: colors, timing, and scroll amounts.

use ratatui::style::Color;

/// Accent color for the header and footer (#98FB98).
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Dimmed color for key hints.
pub(super) const HINT: Color = Color::Rgb(100, 116, 139);

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Scroll amount for arrow keys.
pub(crate) const SCROLL_LINES_SMALL: usize = 1;

/// Scroll amount for PageUp/PageDown and space.
pub(crate) const SCROLL_LINES_PAGE: usize = 10;

/// Key hints shown in the footer.
pub(super) const KEY_HINTS: &str = "b: toggle mode  ↑↓/jk: scroll  PgUp/PgDn  g/G: top/bottom  q: quit";
