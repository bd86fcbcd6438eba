//! Integration tests that run the CLI binary.

use std::io::Write;
use std::path::Path;
use std::process::{Output, Stdio};

fn bin(home: &Path) -> std::process::Command {
    // CARGO_BIN_EXE_<name> uses the binary target name; hyphens require concat! for env!()
    let bin = env!(concat!("CARGO_BIN_EXE_bionic", "-", "reader"));
    let mut cmd = std::process::Command::new(bin);
    // Keep settings out of the real config dir and dotenv() away from the project root
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .env_remove("BIONIC_READER_FONT_MODE")
        .env_remove("BIONIC_READER_MAX_STRIP_BYTES")
        .current_dir(home);
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    bin(home)
        .args(args)
        .output()
        .expect("binary not found - run cargo build first")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["--help"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("bionic-reader"));
    assert!(out.contains("EXAMPLES"));
}

#[test]
fn cli_version_succeeds() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["--version"]);
    assert_success(&output);
    assert!(stdout(&output).contains("bionic-reader"));
}

#[test]
fn bionic_plain_output_marks_bold_parts() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["bionic", "--color", "never", "Hello world!"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "**Hel**lo **wor**ld!\n");
}

#[test]
fn bionic_json_splits_words() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["bionic", "--json", "Hello world!"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value["originalText"], "Hello world!");
    let words = value["words"].as_array().expect("words");
    assert_eq!(words.len(), 4);
    assert_eq!(words[0]["bold"], "Hel");
    assert_eq!(words[0]["normal"], "lo");
    assert_eq!(words[1]["kind"], "space");
    assert_eq!(words[3]["bold"], "");
    assert_eq!(words[3]["kind"], "punctuation");
}

#[test]
fn check_reports_markdown_with_exit_status() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["check", "# Header"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "true");

    let output = run(tmp.path(), &["check", "plain text"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).trim(), "false");
}

#[test]
fn strip_reads_stdin_and_keeps_bold_and_code() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let mut child = bin(tmp.path())
        .args(["strip", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary not found - run cargo build first");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"# Title\n\nSome **bold** and `code`")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert_success(&output);
    assert_eq!(stdout(&output), "Title\n\nSome **bold** and `code`\n");
}

#[test]
fn segments_prints_json() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["segments", "a **b**"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(
        value,
        serde_json::json!([
            { "type": "normal", "content": "a " },
            { "type": "bold", "content": "**b**" }
        ])
    );
}

#[test]
fn stats_prints_json() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["stats", "Hello world!"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value["totalWords"], 2);
    assert_eq!(value["originalLength"], 12);
}

#[test]
fn render_respects_mode() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let render = |mode: &str| {
        run(
            tmp.path(),
            &["render", "--color", "never", "--mode", mode, "Read **this**"],
        )
    };
    let output = render("standard");
    assert_success(&output);
    assert_eq!(stdout(&output), "Read **this**\n");

    let output = render("bionic");
    assert_success(&output);
    assert_eq!(stdout(&output), "Read this\n");
}

#[test]
fn config_set_persists_and_show_reports_it() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["config", "set", "font-mode", "bionic"]);
    assert_success(&output);

    let output = run(tmp.path(), &["config", "show"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("Font mode:        bionic"), "got: {}", out);

    let output = run(tmp.path(), &["config", "reset"]);
    assert_success(&output);
    let output = run(tmp.path(), &["config"]);
    assert!(stdout(&output).contains("Font mode:        standard"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["config", "set", "font-size", "12"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("font-size"), "got: {}", stderr);
}

#[test]
fn invalid_env_override_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(tmp.path())
        .env("BIONIC_READER_FONT_MODE", "fast")
        .args(["check", "x"])
        .output()
        .expect("binary not found - run cargo build first");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("BIONIC_READER_FONT_MODE"), "got: {}", stderr);
}

#[test]
fn completions_generate_script() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = run(tmp.path(), &["completions", "bash"]);
    assert_success(&output);
    assert!(stdout(&output).contains("bionic-reader"));
}
