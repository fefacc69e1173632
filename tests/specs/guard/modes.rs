//! Exclusion guard specs

use crate::prelude::*;

#[test]
fn drop_mode_skips_calls_while_busy() {
    let out = pacer()
        .args(&["guard", "a", "b", "c", "--mode", "drop", "--work", "300ms"])
        .passes();
    assert_eq!(out.lines(), vec!["b dropped", "c dropped", "a completed"]);
}

#[test]
fn latest_mode_runs_first_and_newest() {
    let out = pacer()
        .args(&["guard", "a", "b", "c", "--mode", "latest", "--work", "300ms"])
        .passes();
    assert_eq!(
        out.lines(),
        vec!["b superseded", "a completed", "c completed"]
    );
}

#[test]
fn queue_mode_runs_every_call() {
    let out = pacer()
        .args(&["guard", "a", "b", "c", "--mode", "queue", "--work", "50ms"])
        .passes();
    assert_eq!(out.lines(), vec!["a completed", "b completed", "c completed"]);
}

#[test]
fn failure_is_reported_to_its_caller() {
    let out = pacer()
        .args(&["guard", "a", "b", "--mode", "queue", "--work", "20ms", "--fail", "a"])
        .passes();
    assert_eq!(
        out.lines(),
        vec!["a failed: simulated failure in a", "b completed"]
    );
}
