//! Reading settings: font mode and colours, persisted in `~/.config/bionic-reader/settings.json`.
//!
//! Missing keys in the file fall back to defaults, so older or hand-written files
//! keep working.

mod themes;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::paths;

pub use themes::{builtin_themes, find_theme};

/// Theme id meaning "use the custom colours".
pub const DEFAULT_THEME: &str = "default";

/// Keys accepted by [`ReadingSettings::set`].
pub const SETTINGS_KEYS: &[&str] = &[
    "font-mode",
    "color-theme",
    "heading-color",
    "subheading-color",
    "body-color",
];

/// Error loading, saving, or updating settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
    #[error("Unknown setting '{0}'")]
    UnknownKey(String),
}

/// How messages are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontMode {
    #[default]
    Standard,
    Bionic,
}

impl FontMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Bionic => "bionic",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Standard => Self::Bionic,
            Self::Bionic => Self::Standard,
        }
    }
}

impl fmt::Display for FontMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "bionic" => Ok(Self::Bionic),
            _ => Err(SettingsError::InvalidValue {
                key: "font-mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// 24-bit colour parsed from `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

/// Resolved colours used by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: Rgb,
    pub subheading: Rgb,
    pub body: Rgb,
}

/// Custom colours, used when the theme is `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub heading: String,
    pub subheading: String,
    pub body: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            heading: "#06b6d4".to_string(),
            subheading: "#3b82f6".to_string(),
            body: "#e2e8f0".to_string(),
        }
    }
}

/// User reading preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadingSettings {
    pub font_mode: FontMode,
    pub color_theme: String,
    pub colors: Colors,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            font_mode: FontMode::default(),
            color_theme: DEFAULT_THEME.to_string(),
            colors: Colors::default(),
        }
    }
}

fn invalid(key: &str, value: &str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn checked_color(key: &str, value: &str) -> Result<String, SettingsError> {
    Rgb::from_hex(value)
        .map(|_| value.trim().to_ascii_lowercase())
        .ok_or_else(|| invalid(key, value))
}

impl ReadingSettings {
    /// Update one setting by its CLI key, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "font-mode" => self.font_mode = value.parse()?,
            "color-theme" => {
                let theme = find_theme(value).ok_or_else(|| invalid(key, value))?;
                self.color_theme = theme.id.clone();
            }
            "heading-color" => self.colors.heading = checked_color(key, value)?,
            "subheading-color" => self.colors.subheading = checked_color(key, value)?,
            "body-color" => self.colors.body = checked_color(key, value)?,
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Colours for rendering: the theme's palette, or the custom colours for `default`.
    /// Unparseable colours fall back to the defaults.
    pub fn palette(&self) -> Palette {
        let defaults = Colors::default();
        let (heading, subheading, body) = match find_theme(&self.color_theme) {
            Some(theme) if theme.id != DEFAULT_THEME => {
                (&theme.colors[0], &theme.colors[1], &theme.colors[2])
            }
            Some(_) => (
                &self.colors.heading,
                &self.colors.subheading,
                &self.colors.body,
            ),
            None => {
                log::warn!(
                    "Unknown color theme '{}', using default colors",
                    self.color_theme
                );
                (&defaults.heading, &defaults.subheading, &defaults.body)
            }
        };
        let resolve = |value: &str, fallback: &str| {
            Rgb::from_hex(value).unwrap_or_else(|| {
                log::warn!("Invalid color '{}', using {}", value, fallback);
                Rgb::from_hex(fallback).unwrap_or(Rgb { r: 0, g: 0, b: 0 })
            })
        };
        Palette {
            heading: resolve(heading, &defaults.heading),
            subheading: resolve(subheading, &defaults.subheading),
            body: resolve(body, &defaults.body),
        }
    }
}

/// Path to the settings file in the config directory.
pub fn settings_path() -> Option<PathBuf> {
    paths::config_dir().map(|d| d.join("settings.json"))
}

/// Load settings from `path`. Returns defaults if the file is absent.
pub fn load_from(path: &Path) -> Result<ReadingSettings, SettingsError> {
    if !path.exists() {
        return Ok(ReadingSettings::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save settings to `path`, creating parent directories if needed.
pub fn save_to(path: &Path, settings: &ReadingSettings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}

/// Load settings from the config directory. Defaults when there is no config directory.
pub fn load() -> Result<ReadingSettings, SettingsError> {
    match settings_path() {
        Some(path) => load_from(&path),
        None => Ok(ReadingSettings::default()),
    }
}

/// Save settings to the config directory.
pub fn save(settings: &ReadingSettings) -> Result<(), SettingsError> {
    let path = settings_path().ok_or(SettingsError::NoConfigDir)?;
    save_to(&path, settings)
}
