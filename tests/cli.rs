#![cfg(feature = "cli")]

//! End-to-end tests for the `calculator` binary.

use std::process::{Command, Output};

fn calculator(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calculator"))
        .args(args)
        .env("MATHFORMER_BACKEND", "lite")
        .env("MATHFORMER_LOG_LEVEL", "error")
        .output()
        .expect("failed to run calculator")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_add() {
    let output = calculator(&["add", "2", "3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "5");
}

#[test]
fn test_negative_and_fractional_operands() {
    let output = calculator(&["mul", "-4", "2.9"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "-8");
}

#[test]
fn test_division_by_zero_exits_zero() {
    let output = calculator(&["div", "5", "0"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Error: Division by zero");
}

#[test]
fn test_unknown_operation_exits_zero() {
    let output = calculator(&["pow", "2", "3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Error: Unknown operation 'pow'");
}

#[test]
fn test_invalid_operand_exits_zero() {
    let output = calculator(&["add", "x", "3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Error: Invalid number: 'x'");
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    for args in [&[][..], &["add"][..], &["add", "1"][..], &["add", "1", "2", "3"][..]] {
        let output = calculator(args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        assert!(stdout(&output).starts_with("Usage: calculator"), "{args:?}");
    }
}

#[test]
fn test_leading_hyphen_operation_is_not_a_flag() {
    let output = calculator(&["-5", "2", "3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Error: Unknown operation '-5'");

    let output = calculator(&["-h", "2", "3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Error: Unknown operation '-h'");
}

#[test]
fn test_help_is_an_ordinary_argument() {
    let output = calculator(&["add", "2", "--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Error: Invalid number: '--help'");

    for args in [&["--help"][..], &["-h"][..], &["--version"][..]] {
        let output = calculator(args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        assert!(stdout(&output).starts_with("Usage: calculator"), "{args:?}");
    }
}

#[test]
fn test_ignored_settings_are_logged() {
    let output = Command::new(env!("CARGO_BIN_EXE_calculator"))
        .args(["add", "1", "1"])
        .env("MATHFORMER_BACKEND", "lite")
        .env("MATHFORMER_LOG_LEVEL", "warn")
        .env("MATHFORMER_PROBE_TIMEOUT_MS", "soon")
        .output()
        .expect("failed to run calculator");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MATHFORMER_PROBE_TIMEOUT_MS"), "{stderr}");
}

#[test]
fn test_stdout_is_only_the_result() {
    // Diagnostics go to stderr even at the chattiest level.
    let output = Command::new(env!("CARGO_BIN_EXE_calculator"))
        .args(["sub", "10", "4"])
        .env("MATHFORMER_BACKEND", "none")
        .env("MATHFORMER_LOG_LEVEL", "trace")
        .output()
        .expect("failed to run calculator");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "6\n");
}
