//! CLI error specs

use crate::prelude::*;

#[test]
fn queue_requires_durations() {
    pacer().args(&["queue"]).fails();
}

#[test]
fn unknown_guard_mode_is_rejected() {
    pacer()
        .args(&["guard", "a", "--mode", "skip"])
        .fails()
        .stderr_has("unknown guard mode: skip");
}

#[test]
fn invalid_duration_is_rejected() {
    pacer().args(&["queue", "soon"]).fails();
}

#[test]
fn missing_config_file_is_reported() {
    pacer()
        .config(std::path::Path::new("/nonexistent/pacer.toml"))
        .args(&["guard", "a"])
        .fails()
        .stderr_has("loading config from /nonexistent/pacer.toml");
}

#[test]
fn flush_and_cancel_conflict() {
    pacer()
        .args(&["debounce", "a", "--flush", "--cancel"])
        .fails();
}
