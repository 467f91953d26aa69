//! Child process execution and PATH lookups.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

use super::RealRuntime;

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Short human-readable reason for a failed run.
    pub fn failure_reason(&self) -> String {
        let stderr = self.stderr.trim();
        match (self.code, stderr.is_empty()) {
            (Some(code), true) => format!("exited with status {}", code),
            (Some(code), false) => format!("exited with status {}: {}", code, stderr),
            (None, true) => "terminated by signal".to_string(),
            (None, false) => format!("terminated by signal: {}", stderr),
        }
    }
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_command_impl(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {}", program))?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn which_impl(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;

    #[test]
    fn test_failure_reason_variants() {
        let out = CommandOutput {
            success: false,
            code: Some(2),
            ..Default::default()
        };
        assert_eq!(out.failure_reason(), "exited with status 2");

        let out = CommandOutput {
            success: false,
            code: Some(1),
            stderr: "boom\n".into(),
            ..Default::default()
        };
        assert_eq!(out.failure_reason(), "exited with status 1: boom");

        let out = CommandOutput::default();
        assert_eq!(out.failure_reason(), "terminated by signal");
    }

    #[test]
    fn test_run_missing_program_is_error() {
        let runtime = RealRuntime;
        let result = runtime.run_command("lnb-definitely-not-a-real-program", &[]);
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_command_captures_output() {
        let runtime = RealRuntime;
        let out = runtime
            .run_command("sh", &["-c".to_string(), "echo hi; exit 3".to_string()])
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout.trim(), "hi");
    }

    #[cfg(unix)]
    #[test]
    fn test_which_finds_shell() {
        let runtime = RealRuntime;
        assert!(runtime.which("sh").is_some());
        assert!(runtime.which("lnb-definitely-not-a-real-program").is_none());
    }
}
