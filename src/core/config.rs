use std::env;

use crate::core::markdown::{DEFAULT_MAX_INPUT_BYTES, MarkdownStripper};
use crate::core::settings::{self, ReadingSettings, SettingsError};

/// Environment variable overriding the saved font mode.
pub const FONT_MODE_ENV: &str = "BIONIC_READER_FONT_MODE";
/// Environment variable overriding the stripper input limit (bytes).
pub const MAX_STRIP_BYTES_ENV: &str = "BIONIC_READER_MAX_STRIP_BYTES";

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: ReadingSettings,
    pub max_strip_bytes: usize,
}

impl Config {
    /// Markdown stripper honouring the configured input limit.
    pub fn stripper(&self) -> MarkdownStripper {
        MarkdownStripper::new(self.max_strip_bytes)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("{var} has an invalid value: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

/// Apply environment overrides to saved settings. `lookup` reads a variable.
pub fn resolve<F>(settings: ReadingSettings, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = settings;
    if let Some(value) = lookup(FONT_MODE_ENV) {
        settings.font_mode = value.parse().map_err(|_| ConfigError::InvalidEnv {
            var: FONT_MODE_ENV,
            value: value.clone(),
        })?;
    }
    let max_strip_bytes = match lookup(MAX_STRIP_BYTES_ENV) {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidEnv {
                var: MAX_STRIP_BYTES_ENV,
                value,
            })?,
        None => DEFAULT_MAX_INPUT_BYTES,
    };
    Ok(Config {
        settings,
        max_strip_bytes,
    })
}

/// Load saved settings and apply environment overrides.
pub fn load() -> Result<Config, ConfigError> {
    let saved = settings::load()?;
    resolve(saved, |var| env::var(var).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::FontMode;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_env() {
        let config = resolve(ReadingSettings::default(), no_env).unwrap();
        assert_eq!(config.settings.font_mode, FontMode::Standard);
        assert_eq!(config.max_strip_bytes, DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn env_overrides_font_mode_and_limit() {
        let config = resolve(ReadingSettings::default(), |var| match var {
            FONT_MODE_ENV => Some("bionic".to_string()),
            MAX_STRIP_BYTES_ENV => Some("1024".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.settings.font_mode, FontMode::Bionic);
        assert_eq!(config.max_strip_bytes, 1024);
    }

    #[test]
    fn invalid_env_values_are_errors() {
        let err = resolve(ReadingSettings::default(), |var| {
            (var == FONT_MODE_ENV).then(|| "fast".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains(FONT_MODE_ENV));

        let err = resolve(ReadingSettings::default(), |var| {
            (var == MAX_STRIP_BYTES_ENV).then(|| "0".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }
}
