use assert_cmd::Command;
use bfi_test_utils::TestFile;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfi").unwrap()
}

fn run_program(source: &str, extra_args: &[&str]) -> assert_cmd::assert::Assert {
    let file = TestFile::with_content(source).expect("temp program");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("--file")
        .arg(file.path())
        .args(extra_args)
        .assert()
}

#[test]
fn prints_capital_a() {
    run_program("++++++[>++++++++++<-]>+++++.", &[])
        .success()
        .stdout("A");
}

#[test]
fn echoes_input() {
    run_program(",.", &["--input", "Z"]).success().stdout("Z");
}

#[test]
fn exhausted_input_outputs_zero_byte() {
    run_program(",.", &[]).success().stdout("\u{0}");
}

#[test]
fn unmatched_opening_bracket() {
    run_program("[", &[])
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "unmatched opening bracket at position 0",
        ));
}

#[test]
fn unmatched_closing_bracket() {
    run_program("]", &[])
        .failure()
        .stderr(predicate::str::contains(
            "unmatched closing bracket at position 0",
        ));
}

#[test]
fn memory_overflow_on_tiny_tape() {
    run_program(">", &["--memory", "1"])
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("memory pointer overflow at position 0"))
        .stderr(predicate::str::contains("pointer would move to 1, tape has 1 cells"));
}

#[test]
fn memory_underflow_keeps_earlier_output() {
    run_program("+++++++++++++++++++++++++++++++++.<", &[])
        .failure()
        .stdout("!")
        .stderr(predicate::str::contains("memory pointer underflow at position 34"))
        .stderr(predicate::str::contains("pointer would move to -1"));
}

fn occurrences(assert: &assert_cmd::assert::Assert, needle: &str) -> usize {
    String::from_utf8_lossy(&assert.get_output().stderr)
        .matches(needle)
        .count()
}

#[test]
fn fault_message_is_printed_once() {
    let assert = run_program("]", &[]).failure();
    assert_eq!(occurrences(&assert, "unmatched closing bracket at position 0"), 1);

    let assert = run_program("+[", &[]).failure();
    assert_eq!(occurrences(&assert, "unmatched opening bracket at position 1"), 1);

    let assert = run_program(">", &["--memory", "1"]).failure();
    assert_eq!(occurrences(&assert, "memory pointer overflow"), 1);
}

#[test]
fn missing_file_argument_is_a_usage_error() {
    cargo_bin()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn unreadable_file_is_reported() {
    cargo_bin()
        .args(["--file", "/definitely/not/here.bf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading program"));
}

#[test]
fn debug_mode_steps_on_enter() {
    let file = TestFile::with_content("+.").expect("temp program");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("--file")
        .arg(file.path())
        .arg("--debug")
        .write_stdin("\n\n")
        .assert()
        .success()
        .stdout("\u{1}")
        .stderr(
            predicate::str::contains("-- Debug State --")
                .and(predicate::str::contains("Press Enter to continue...")),
        );
}

#[test]
fn report_state_lists_tape() {
    run_program("+>++", &["--report-state"])
        .success()
        .stderr(predicate::str::contains("Tape:\n[0, 1],[1, 2]"));
}
