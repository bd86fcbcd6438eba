//! CLI-only commands: text processing, settings management.
//!
//! These run without opening the TUI and print plain text or JSON.

use std::env;
use std::fs;
use std::io::{self, IsTerminal};

use serde::Serialize;

use crate::core::bionic::{bionic_stats, process_bionic_text};
use crate::core::compose::{bionic_runs, compose_message};
use crate::core::config::Config;
use crate::core::markdown::{
    clean_markdown_text, has_markdown_formatting, process_for_bionic_reading, split_segments,
};
use crate::core::settings::{self, DEFAULT_THEME, FontMode, Palette, ReadingSettings};
use crate::output::{render_marked, render_runs};

/// Read the text argument: `-` means stdin.
pub fn read_input(text: &str) -> io::Result<String> {
    if text == "-" {
        io::read_to_string(io::stdin())
    } else {
        Ok(text.to_string())
    }
}

/// Read the text argument, or print the error and exit.
pub fn input_or_exit(text: &str) -> String {
    read_input(text).unwrap_or_else(|e| {
        eprintln!("Error reading from stdin: {}", e);
        std::process::exit(1);
    })
}

/// Read a file path (or `-` for stdin), or print the error and exit.
pub fn file_or_exit(path: &str) -> String {
    let result = if path == "-" {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error: cannot read {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Palette for stdout, or `None` when colour is off.
pub fn stdout_palette(config: &Config, color: Option<bool>) -> Option<Palette> {
    let enabled = color.unwrap_or_else(|| {
        io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
    });
    enabled.then(|| config.settings.palette())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run the `bionic` command. Without colour the bold parts are marked with `**`.
pub fn run_bionic(text: &str, json: bool, palette: Option<&Palette>) {
    if json {
        print_json(&process_bionic_text(text));
    } else if palette.is_some() {
        println!("{}", render_runs(&bionic_runs(text), palette));
    } else {
        println!("{}", render_marked(&bionic_runs(text)));
    }
}

/// Run the `strip` command.
pub async fn run_strip(config: &Config, text: &str, keep_code_only: bool) {
    let stripper = config.stripper();
    let out = if keep_code_only {
        clean_markdown_text(text, &stripper).await
    } else {
        process_for_bionic_reading(text, &stripper).await
    };
    println!("{}", out);
}

/// Run the `segments` command.
pub fn run_segments(text: &str) {
    print_json(&split_segments(text));
}

/// Run the `render` command.
pub async fn run_render(config: &Config, text: &str, mode: FontMode, palette: Option<&Palette>) {
    let runs = compose_message(text, mode, &config.stripper()).await;
    println!("{}", render_runs(&runs, palette));
}

/// Run the `check` command: exit status 0 when markdown is present, 1 otherwise.
pub fn run_check(text: &str) {
    let found = has_markdown_formatting(text);
    println!("{}", found);
    if !found {
        std::process::exit(1);
    }
}

/// Run the `stats` command.
pub fn run_stats(text: &str) {
    print_json(&bionic_stats(&process_bionic_text(text)));
}

/// Run the `config show` command: settings file, effective settings, themes.
pub fn run_config_show(config: &Config) {
    let path = settings::settings_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    let s = &config.settings;
    println!("Settings:         {}", path);
    println!("Font mode:        {}", s.font_mode);
    println!("Color theme:      {}", s.color_theme);
    println!("Heading color:    {}", s.colors.heading);
    println!("Subheading color: {}", s.colors.subheading);
    println!("Body color:       {}", s.colors.body);
    println!("Max strip bytes:  {}", config.max_strip_bytes);
    println!();
    println!("Themes:");
    for theme in settings::builtin_themes() {
        let marker = if theme.id.eq_ignore_ascii_case(&s.color_theme) {
            "*"
        } else {
            " "
        };
        let colors = if theme.id == DEFAULT_THEME {
            "custom colors".to_string()
        } else {
            theme.colors.join(" ")
        };
        println!(" {} {:<12} {:<12} {}", marker, theme.id, theme.label, colors);
    }
}

/// Run the `config set` command: update one saved setting.
pub fn run_config_set(key: &str, value: &str) {
    let result = settings::load().and_then(|mut saved| {
        saved.set(key, value)?;
        settings::save(&saved)
    });
    match result {
        Ok(()) => println!("{} = {}", key, value.trim()),
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, settings::SettingsError::UnknownKey(_)) {
                eprintln!("Valid keys: {}", settings::SETTINGS_KEYS.join(", "));
            }
            std::process::exit(1);
        }
    }
}

/// Run the `config reset` command: write default settings.
pub fn run_config_reset() {
    match settings::save(&ReadingSettings::default()) {
        Ok(()) => println!("Settings reset to defaults"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Persist a font mode chosen in the reader. Failures are logged, not fatal.
pub fn save_font_mode(mode: FontMode) {
    let result = settings::load().and_then(|mut saved| {
        saved.font_mode = mode;
        settings::save(&saved)
    });
    if let Err(e) = result {
        log::warn!("Could not save font mode: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_input_passes_text_through() {
        assert_eq!(read_input("hello").unwrap(), "hello");
        assert_eq!(read_input("").unwrap(), "");
    }

    #[test]
    fn palette_follows_color_flag() {
        let config = crate::core::config::resolve(ReadingSettings::default(), |_| None).unwrap();
        assert!(stdout_palette(&config, Some(false)).is_none());
        assert_eq!(
            stdout_palette(&config, Some(true)),
            Some(ReadingSettings::default().palette())
        );
    }
}
