//! Colour themes loaded from `config/color-themes.json` (embedded at compile time).

use std::sync::OnceLock;

use serde::Deserialize;

/// A named three-colour palette: heading, subheading, body.
#[derive(Clone, Debug, Deserialize)]
pub struct ThemeDef {
    pub id: String,
    pub label: String,
    pub colors: [String; 3],
}

fn load_themes() -> Vec<ThemeDef> {
    let json = include_str!("../../../config/color-themes.json");
    serde_json::from_str(json).expect("color-themes.json must be valid")
}

static THEMES: OnceLock<Vec<ThemeDef>> = OnceLock::new();

/// All built-in themes, loading from config on first access.
pub fn builtin_themes() -> &'static [ThemeDef] {
    THEMES.get_or_init(load_themes)
}

/// Theme definition by id (case-insensitive).
pub fn find_theme(id: &str) -> Option<&'static ThemeDef> {
    builtin_themes()
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(id))
}
