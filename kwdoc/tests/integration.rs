use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_kwdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn keyword_span(name: &str) -> String {
    format!(r#"<span style="color: #4ec9b0; font-weight: bold;">{name}</span>"#)
}

// -- stdin mode --

#[test]
fn stdin_mode_produces_markdown() {
    let input = fs::read_to_string(fixture_path("ProcessLibrary.py")).unwrap();

    let assert = cmd().write_stdin(input).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.starts_with("# ProcessLibrary\n\n**Version:** 1.4.0  \n**Scope:** SUITE\n"));
    assert!(output.contains("* [Launch Process](#launch-process)"));
    assert!(output.contains("* [Terminate Process](#terminate-process)"));
    assert!(output.contains("### Process Environment"));
    assert!(!output.contains("Internal"));
}

#[test]
fn stdin_module_library_is_named_library() {
    let input = fs::read_to_string(fixture_path("string_keywords.py")).unwrap();

    cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Library\n"))
        .stdout(predicate::str::contains("### Join Words"))
        .stdout(predicate::str::contains("### Reverse Text"));
}

#[test]
fn stdin_mode_json() {
    let input = fs::read_to_string(fixture_path("string_keywords.py")).unwrap();

    let assert = cmd().args(["-f", "json"]).write_stdin(input).assert().success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["name"], "Library");
    assert_eq!(value["version"], "0.3");
    assert_eq!(value["scope"], "TEST");
    assert_eq!(value["keywords"][0]["name"], "Join Words");
    assert_eq!(value["keywords"][0]["parameters"][0]["name"], "*words");
    assert_eq!(value["keywords"][0]["return_type"], "str");
    assert_eq!(value["keywords"][1]["example"], "    ${out}=    Reverse Text    abc");
}

// -- file mode --

#[test]
fn file_mode_markdown() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("process.md");

    cmd()
        .args(["-o", out.to_str().unwrap(), &fixture_path("ProcessLibrary.py")])
        .assert()
        .success();

    let output = fs::read_to_string(&out).unwrap();
    assert!(output.contains("## Description"));
    assert!(output.contains("<h1>Usage</h1>"));
    assert!(output.contains("<li>Start a process with <code>Launch Process</code></li>"));
    assert!(output.contains("<td><del>kill</del> stop</td>"));
    assert!(output.contains("- `command: str`"));
    assert!(output.contains("- `args: Optional[List[str]] = None`"));
    assert!(output.contains("- `timeout: float = 5.0`"));
    assert!(output.contains("**Returns:** `int`"));
    assert!(output.contains("**Returns:** `Dict[str, str]`"));
    assert!(output.contains("<p>Stop the process with <strong>pid</strong>.</p>"));
}

#[test]
fn file_mode_html_highlights_robot_examples() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args([
            "-f",
            "html",
            "-o",
            dir.path().to_str().unwrap(),
            &fixture_path("ProcessLibrary.py"),
        ])
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("ProcessLibrary.html")).unwrap();
    assert!(output.starts_with("<!DOCTYPE html>"));
    assert!(output.contains("<li><a href=\"#launch-process\">Launch Process</a></li>"));
    assert!(output.contains("<div class=\"code-block\"><pre class=\"language-robot\">"));
    assert!(output.contains(&keyword_span("Launch Process")));
    assert!(output.contains(&keyword_span("Should Be True")));
    assert!(output.contains(r#"<span style="color: #9cdcfe;">${pid}</span>"#));
    assert!(!output.contains("\u{E000}"));
}

#[test]
fn file_mode_multiple_inputs_write_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("docs");

    cmd()
        .args([
            "-f",
            "json",
            "-o",
            out.to_str().unwrap(),
            &fixture_path("ProcessLibrary.py"),
            &fixture_path("string_keywords.py"),
        ])
        .assert()
        .success();

    assert!(out.join("ProcessLibrary.json").is_file());
    assert!(out.join("string_keywords.json").is_file());
    let text = fs::read_to_string(out.join("string_keywords.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["name"], "string_keywords");
}

#[test]
fn file_mode_glob() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/tests/fixtures/*.py", env!("CARGO_MANIFEST_DIR"));

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), &pattern])
        .assert()
        .success();

    assert!(dir.path().join("ProcessLibrary.md").is_file());
    assert!(dir.path().join("string_keywords.md").is_file());
}

#[test]
fn no_matching_files_fails() {
    cmd()
        .arg("/nonexistent/*.py")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input files matched"));
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["-f", "pdf"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: pdf"));
}

// -- configuration --

#[test]
fn custom_keywords_from_config() {
    let input = "\
from robot.api.deco import keyword

@keyword
def ship():
    \"\"\"Ship it.

    ```robot
        Deploy Build    release
    ```
    \"\"\"
";
    cmd()
        .args(["-f", "html", "-c", &fixture_path("config.json")])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(keyword_span("Deploy Build")));
}

#[test]
fn missing_config_warns_and_uses_defaults() {
    let input = fs::read_to_string(fixture_path("string_keywords.py")).unwrap();

    cmd()
        .args(["-c", "/nonexistent/kwdoc.json"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("### Reverse Text"))
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_config_reports_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.json");
    fs::write(&config, "{ not json").unwrap();

    cmd()
        .args(["-c", config.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid JSON in config file"));
}

#[test]
fn quiet_suppresses_warnings() {
    cmd()
        .args(["-q", "-c", "/nonexistent/kwdoc.json"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
