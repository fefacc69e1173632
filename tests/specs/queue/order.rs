//! Queue ordering specs

use crate::prelude::*;

#[test]
fn completes_in_submission_order() {
    let out = pacer().args(&["queue", "30ms", "10ms", "20ms"]).passes();
    assert_eq!(
        out.lines(),
        vec!["op-0 completed: 30ms", "op-1 completed: 10ms", "op-2 completed: 20ms"]
    );
}

#[test]
fn failure_does_not_stop_later_operations() {
    let out = pacer()
        .args(&["queue", "10ms", "10ms", "10ms", "--fail", "1"])
        .passes();
    assert_eq!(
        out.lines(),
        vec![
            "op-0 completed: 10ms",
            "op-1 failed: simulated failure in op-1",
            "op-2 completed: 10ms",
        ]
    );
}

#[test]
fn json_output_is_one_object_per_line() {
    let out = pacer()
        .args(&["--format", "json", "queue", "5ms"])
        .passes();
    assert_eq!(
        out.lines(),
        vec![r#"{"caller":"op-0","outcome":"completed","detail":"5ms"}"#]
    );
}
