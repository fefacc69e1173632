//! Debounce specs

use crate::prelude::*;

#[test]
fn burst_runs_only_the_last_call() {
    let out = pacer()
        .args(&["debounce", "h", "he", "hello", "--delay", "100ms"])
        .passes();
    assert_eq!(
        out.lines(),
        vec!["h superseded", "he superseded", "hello completed"]
    );
}

#[test]
fn flush_runs_without_waiting() {
    let out = pacer()
        .args(&["debounce", "a", "b", "--delay", "10s", "--flush"])
        .passes();
    assert_eq!(out.lines(), vec!["a superseded", "b completed"]);
}

#[test]
fn cancel_discards_the_pending_call() {
    let out = pacer()
        .args(&["debounce", "a", "b", "--cancel"])
        .passes();
    assert_eq!(out.lines(), vec!["a superseded", "b cancelled"]);
}
