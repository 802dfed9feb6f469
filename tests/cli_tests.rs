//! Integration tests for the extract-require CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Test helper to get the CLI binary
fn extract_cmd() -> Command {
    let mut cmd = Command::cargo_bin("extract-require").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("EXTRACT_REQUIRE_LANGUAGE")
        .env_remove("EXTRACT_REQUIRE_WORD");
    cmd
}

#[test]
fn test_prints_references_as_json_array() {
    extract_cmd()
        .write_stdin("var fs = require('fs');\nvar path = require(\"path\");\n")
        .assert()
        .success()
        .stdout(predicate::eq(r#"["fs","path"]"#));
}

#[test]
fn test_empty_stdin_prints_empty_array() {
    extract_cmd()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::eq("[]"));
}

#[test]
fn test_source_without_requires_prints_empty_array() {
    extract_cmd()
        .write_stdin("console.log('hello');\n")
        .assert()
        .success()
        .stdout(predicate::eq("[]"));
}

#[test]
fn test_duplicates_and_order_are_preserved() {
    extract_cmd()
        .write_stdin("require('z'); require('a'); require('z');")
        .assert()
        .success()
        .stdout(predicate::eq(r#"["z","a","z"]"#));
}

#[test]
fn test_syntax_error_fails_without_output() {
    extract_cmd()
        .write_stdin("var x = require('fs'\nfunction {")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Parse error in javascript"));
}

#[test]
fn test_expressions_flag_changes_payload_shape() {
    extract_cmd()
        .arg("--expressions")
        .write_stdin("require('a'); require(name);")
        .assert()
        .success()
        .stdout(predicate::eq(r#"{"strings":["a"],"expressions":["name"]}"#));
}

#[test]
fn test_custom_word_flag() {
    extract_cmd()
        .args(["--word", "load"])
        .write_stdin("load('x'); require('y');")
        .assert()
        .success()
        .stdout(predicate::eq(r#"["x"]"#));
}

#[test]
fn test_word_from_environment() {
    extract_cmd()
        .env("EXTRACT_REQUIRE_WORD", "load")
        .write_stdin("load('x'); require('y');")
        .assert()
        .success()
        .stdout(predicate::eq(r#"["x"]"#));
}

#[test]
fn test_typescript_language_flag() {
    extract_cmd()
        .args(["--language", "ts"])
        .write_stdin("import fs = require('fs');\nconst n: number = 1;\n")
        .assert()
        .success()
        .stdout(predicate::eq(r#"["fs"]"#));
}

#[test]
fn test_config_file_is_applied() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("extract-require.yml");
    fs::write(&config_path, "word: need\ninclude_expressions: true\n").unwrap();

    extract_cmd()
        .arg("--config")
        .arg(&config_path)
        .write_stdin("need('a'); need(x);")
        .assert()
        .success()
        .stdout(predicate::eq(r#"{"strings":["a"],"expressions":["x"]}"#));
}

#[test]
fn test_invalid_config_value_fails_before_reading() {
    extract_cmd()
        .args(["--language", "cobol"])
        .write_stdin("require('a')")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unsupported language"));
}

#[test]
fn test_missing_config_file_fails() {
    extract_cmd()
        .args(["--config", "/nonexistent/extract-require.yml"])
        .write_stdin("require('a')")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    extract_cmd()
        .arg("--verbose")
        .write_stdin("require('fs')")
        .assert()
        .success()
        .stdout(predicate::eq(r#"["fs"]"#))
        .stderr(predicate::str::contains("source text read"));
}

#[test]
fn test_print_default_config() {
    extract_cmd()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("word: require"))
        .stdout(predicate::str::contains("language: js"));
}

#[test]
fn test_list_languages() {
    extract_cmd()
        .arg("list-languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("JavaScript"))
        .stdout(predicate::str::contains(".tsx"));
}

#[test]
fn test_help_and_version() {
    extract_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("require"));

    extract_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
