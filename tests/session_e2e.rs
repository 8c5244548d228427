#![allow(clippy::unwrap_used)]
//! End-to-end sessions against a local stub of the chat completion API.

mod common;

use common::{StubBehavior, sentiment, start_stub_server, write_stub_config};
use predicates::prelude::*;
use tempfile::TempDir;

fn stub_home(behavior: StubBehavior) -> TempDir {
    let home = TempDir::new().unwrap();
    let endpoint = start_stub_server(behavior);
    write_stub_config(home.path(), &endpoint);
    home
}

#[test]
fn test_single_input_renders_and_exits() {
    let home = stub_home(StubBehavior::Keywords);

    sentiment(&home)
        .arg("I love this!")
        .assert()
        .success()
        .stdout("The sentiment is positive\n")
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn test_piped_lines_in_order_with_failure_reported() {
    let home = stub_home(StubBehavior::Keywords);

    let assert = sentiment(&home)
        .write_stdin("I love this!\n???\nI hate waiting\n")
        .assert()
        .success()
        .stdout("The sentiment is positive\nThe sentiment is negative\n");

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    let reports: Vec<&str> = stderr.lines().filter(|l| l.starts_with("Error:")).collect();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].contains("SentimentResponse"));
    assert!(reports[0].contains("2 attempt(s)"));
}

#[test]
fn test_piped_stop_word_is_classified_not_a_stop() {
    let home = stub_home(StubBehavior::Keywords);

    sentiment(&home)
        .write_stdin("I love this!\nExit\nI hate waiting\n")
        .assert()
        .success()
        .stdout(
            "The sentiment is positive\nThe sentiment is neutral\nThe sentiment is negative\n",
        )
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn test_batch_file() {
    let home = stub_home(StubBehavior::Keywords);
    let batch = home.path().join("reviews.txt");
    std::fs::write(
        &batch,
        "# product reviews\nI hate waiting\n\nit arrived on a tuesday\n",
    )
    .unwrap();

    sentiment(&home)
        .args(["--file", batch.to_str().unwrap()])
        .assert()
        .success()
        .stdout("The sentiment is negative\nThe sentiment is neutral\n");
}

#[test]
fn test_server_errors_are_reported_not_fatal() {
    let home = stub_home(StubBehavior::ServerError);

    let assert = sentiment(&home)
        .write_stdin("I love this!\nI hate waiting\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    let reports: Vec<&str> = stderr.lines().filter(|l| l.starts_with("Error:")).collect();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.contains("status 500")));
}

#[test]
fn test_rerun_is_byte_identical() {
    let home = stub_home(StubBehavior::Keywords);
    let input = "I love this!\n???\nsomething else\n";

    let first = sentiment(&home).write_stdin(input).assert().success();
    let second = sentiment(&home).write_stdin(input).assert().success();

    assert_eq!(first.get_output().stdout, second.get_output().stdout);
    assert!(!first.get_output().stdout.is_empty());
}
