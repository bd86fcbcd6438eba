//! Build script: validates color-themes.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let themes_path: PathBuf = [&manifest_dir, "config", "color-themes.json"]
        .iter()
        .collect();
    println!("cargo:rerun-if-changed={}", themes_path.display());
    let json = std::fs::read_to_string(&themes_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. color-themes.json must exist and be valid.",
            themes_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct ColorThemeEntry {
        id: String,
        label: String,
        colors: [String; 3],
    }
    let themes: Vec<ColorThemeEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "color-themes.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    for theme in &themes {
        for color in &theme.colors {
            let hex = color.strip_prefix('#').unwrap_or("");
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                panic!(
                    "color-themes.json: theme '{}' has invalid color '{}' (expected #rrggbb)",
                    theme.id, color
                );
            }
        }
    }
}
