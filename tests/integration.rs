//! Integration tests for the mysh binary, driven through standard input.
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn mysh() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("mysh");
    cmd.env_remove("MYSH_LOG");
    cmd
}

#[test]
fn test_end_of_input_exits_successfully() {
    mysh()
        .write_stdin("")
        .assert()
        .success()
        .stdout("> ")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_exit_stops_reading() {
    mysh()
        .write_stdin("exit now please\necho never\n")
        .assert()
        .success()
        .stdout("> ")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_external_output_and_quotes() {
    mysh()
        .write_stdin("echo 'hello   world' a\"b c\"d\nexit\n")
        .assert()
        .success()
        .stdout("> hello   world ab cd\n> ");
}

#[test]
fn test_cd_missing_argument_is_reported() {
    mysh()
        .write_stdin("cd\nexit\n")
        .assert()
        .success()
        .stderr("mysh: expected argument to \"cd\"\n");
}

#[test]
fn test_cd_failure_is_reported_and_shell_continues() {
    mysh()
        .write_stdin("cd /nonexistent\necho still here\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("still here"))
        .stderr(predicate::str::starts_with("mysh: cd: /nonexistent: "));
}

#[test]
fn test_cd_affects_later_commands() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().canonicalize().unwrap();
    let script = format!("cd '{}'\ntouch created-here\nexit\n", target.display());

    mysh()
        .write_stdin(script)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert!(fs::metadata(target.join("created-here")).is_ok());
}

#[test]
fn test_unknown_program_is_reported() {
    mysh()
        .write_stdin("nonexistent-binary-xyz --flag\necho after\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("after"))
        .stderr(predicate::str::starts_with("mysh: nonexistent-binary-xyz: "));
}

#[test]
fn test_unterminated_quote_skips_line() {
    mysh()
        .write_stdin("echo \"mismatched'\necho next\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("next"))
        .stdout(predicate::str::contains("mismatched").not())
        .stderr("mysh: unterminated \" quote starting at column 6\n");
}

#[test]
fn test_failing_command_does_not_stop_shell() {
    mysh()
        .write_stdin("false\nsh -c 'exit 3'\necho alive\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("alive"));
}

#[test]
fn test_custom_prompt() {
    mysh()
        .args(["--prompt", "$ "])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout("$ $ ");
}

#[test]
fn test_debug_logging_shows_tokens() {
    mysh()
        .args(["--log", "debug"])
        .write_stdin("true 'a b'\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(r#"tokens ["true", "a b"]"#));
}

#[test]
fn test_log_level_from_environment() {
    mysh()
        .env("MYSH_LOG", "debug")
        .write_stdin("true 'a b'\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(r#"tokens ["true", "a b"]"#));
}

#[test]
fn test_command_line_level_overrides_environment() {
    mysh()
        .env("MYSH_LOG", "debug")
        .args(["--log", "off"])
        .write_stdin("true\n")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_cd_into_directories_named_like_options() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().canonicalize().unwrap();
    fs::create_dir(base.join("help")).unwrap();
    fs::create_dir(base.join("-dir")).unwrap();
    let script = format!(
        "cd '{}'\ncd help\ntouch in-help\ncd ..\ncd -dir\ntouch in-dir\n",
        base.display()
    );

    mysh()
        .write_stdin(script)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert!(base.join("help/in-help").exists());
    assert!(base.join("-dir/in-dir").exists());
}

#[test]
fn test_bad_option_is_rejected() {
    mysh().args(["--log", "loud"]).assert().failure();
}
