// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn text_line_has_caller_and_outcome() {
    let report = Report::new("op-1", Outcome::Aborted);
    assert_eq!(report.to_string(), "op-1 aborted");
}

#[test]
fn text_line_appends_detail() {
    let report = Report::new("op-0", Outcome::Completed).with_detail("30ms");
    assert_eq!(report.to_string(), "op-0 completed: 30ms");
}

#[test]
fn json_omits_missing_detail() {
    let report = Report::new("b", Outcome::Dropped);
    let json = serde_json::to_string(&report).unwrap();
    assert_eq!(json, r#"{"caller":"b","outcome":"dropped"}"#);
}

#[test]
fn failed_report_carries_error_message() {
    let err = crate::simulate::SimulatedFailure("op-2".to_string());
    let report = Report::failed("op-2", &err);
    assert_eq!(report.outcome, Outcome::Failed);
    assert_eq!(report.to_string(), "op-2 failed: simulated failure in op-2");
}

/// Displays fine but refuses to serialize
struct Unserializable;

impl fmt::Display for Unserializable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unserializable")
    }
}

impl Serialize for Unserializable {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("no json form"))
    }
}

#[test]
fn json_failure_is_returned() {
    let err = print(&Unserializable, OutputFormat::Json).unwrap_err();
    assert!(err.to_string().contains("no json form"));
}

#[test]
fn text_output_does_not_serialize() {
    assert!(print(&Unserializable, OutputFormat::Text).is_ok());
}
