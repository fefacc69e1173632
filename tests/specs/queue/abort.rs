//! Queue abort specs

use crate::prelude::*;

#[test]
fn abort_fails_waiting_operations_only() {
    let out = pacer()
        .args(&["queue", "300ms", "10ms", "10ms", "--abort-after", "100ms"])
        .passes();
    assert_eq!(
        out.lines(),
        vec!["op-1 aborted", "op-2 aborted", "op-0 completed: 300ms"]
    );
}

#[test]
fn abort_is_logged_when_verbose() {
    pacer()
        .args(&["-v", "queue", "200ms", "10ms", "--abort-after", "50ms"])
        .passes()
        .stderr_has("queue aborted failed=1");
}
