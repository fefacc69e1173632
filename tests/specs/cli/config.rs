//! Config file specs

use crate::prelude::*;
use std::io::Write;

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn config_sets_guard_mode() {
    let config = config_file("[guard]\nmode = \"queue\"\n");

    let out = pacer()
        .config(config.path())
        .args(&["guard", "a", "b", "--work", "50ms"])
        .passes();
    assert_eq!(out.lines(), vec!["a completed", "b completed"]);
}

#[test]
fn flag_overrides_config_mode() {
    let config = config_file("[guard]\nmode = \"queue\"\n");

    let out = pacer()
        .config(config.path())
        .args(&["guard", "a", "b", "--work", "200ms", "--mode", "drop"])
        .passes();
    assert_eq!(out.lines(), vec!["b dropped", "a completed"]);
}

#[test]
fn invalid_config_is_rejected() {
    let config = config_file("[debounce]\ndelay = 5\n");

    pacer()
        .config(config.path())
        .args(&["debounce", "a"])
        .fails()
        .stderr_has("invalid config");
}
