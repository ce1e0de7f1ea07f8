use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_commands() {
    Command::cargo_bin("sqs-smoke")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("smoke"))
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("poll"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("sqs-smoke")
        .unwrap()
        .arg("purge")
        .assert()
        .failure();
}

#[test]
fn poll_requires_a_queue() {
    Command::cargo_bin("sqs-smoke")
        .unwrap()
        .arg("poll")
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUEUE"));
}
