//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::Path;

pub use predicates::prelude::*;

/// Build a `pacer` invocation
pub fn pacer() -> Run {
    Run {
        cmd: Command::cargo_bin("pacer").unwrap(),
    }
}

pub struct Run {
    cmd: Command,
}

impl Run {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn config(mut self, path: &Path) -> Self {
        self.cmd.arg("--config").arg(path);
        self
    }

    /// Run and require success
    pub fn passes(mut self) -> Output {
        let assert = self.cmd.assert().success();
        Output::from(assert.get_output())
    }

    /// Run and require failure
    pub fn fails(mut self) -> Output {
        let assert = self.cmd.assert().failure();
        Output::from(assert.get_output())
    }
}

pub struct Output {
    pub stdout: String,
    pub stderr: String,
}

impl From<&std::process::Output> for Output {
    fn from(output: &std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Output {
    pub fn stderr_has(self, expected: &str) -> Self {
        assert!(
            predicate::str::contains(expected).eval(&self.stderr),
            "stderr missing {expected:?}:\n{}",
            self.stderr
        );
        self
    }

    /// Stdout lines, in order
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}
