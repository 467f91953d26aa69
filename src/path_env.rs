//! `PATH` membership checks and Windows user-PATH management.

use anyhow::{Result, bail};
use log::debug;
use std::path::Path;

use crate::platform::Os;
use crate::runtime::Runtime;

/// Outcome of [`ensure_in_user_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathUpdate {
    AlreadyPresent,
    Added,
    /// The directory could not be added; the user was told how to do it by hand.
    Failed(String),
}

/// Split a `PATH`-style value into its non-empty entries.
pub fn split_path(value: &str, os: Os) -> Vec<&str> {
    value
        .split(os.path_separator())
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Whether `dir` is one of the entries of `value`.
///
/// Trailing separators are ignored. Windows comparisons are case-insensitive.
pub fn contains_dir(value: &str, dir: &Path, os: Os) -> bool {
    let wanted = trim_dir(&dir.to_string_lossy(), os).to_string();
    split_path(value, os).into_iter().any(|entry| {
        let entry = trim_dir(entry, os);
        if os.is_windows() {
            entry.eq_ignore_ascii_case(&wanted)
        } else {
            entry == wanted
        }
    })
}

fn trim_dir(dir: &str, os: Os) -> &str {
    let trimmed = if os.is_windows() {
        dir.trim_end_matches(['/', '\\'])
    } else {
        dir.trim_end_matches('/')
    };
    if trimmed.is_empty() { dir } else { trimmed }
}

/// Tell the user when `dir` is missing from the current process `PATH`.
/// Returns whether it is present.
pub fn warn_if_not_on_path<R: Runtime>(runtime: &R, dir: &Path, os: Os) -> bool {
    let path = runtime.env_var("PATH").unwrap_or_default();
    if contains_dir(&path, dir, os) {
        return true;
    }
    debug!("{:?} is not on PATH", dir);
    println!(
        "⚠️  {} is not in your PATH. Add it to run installed commands by name.",
        dir.display()
    );
    false
}

/// Quote a string as a PowerShell single-quoted literal.
fn ps_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn run_powershell<R: Runtime>(runtime: &R, script: &str) -> Result<String> {
    let args = vec![
        "-NoProfile".to_string(),
        "-NonInteractive".to_string(),
        "-Command".to_string(),
        script.to_string(),
    ];
    let output = runtime.run_command("powershell", &args)?;
    if !output.success {
        bail!("powershell {}", output.failure_reason());
    }
    Ok(output.stdout.trim().to_string())
}

/// Read the persistent user-level `Path` variable.
#[tracing::instrument(skip(runtime))]
pub fn query_user_path<R: Runtime>(runtime: &R) -> Result<String> {
    run_powershell(
        runtime,
        "[Environment]::GetEnvironmentVariable('Path', 'User')",
    )
}

/// Append `dir` to the persistent user-level `Path` variable.
#[tracing::instrument(skip(runtime))]
pub fn append_to_user_path<R: Runtime>(runtime: &R, dir: &Path, current: &str) -> Result<()> {
    let dir = dir.to_string_lossy();
    let current = current.trim().trim_end_matches(';');
    let new_value = if current.is_empty() {
        dir.into_owned()
    } else {
        format!("{};{}", current, dir)
    };
    debug!("New user Path: {}", new_value);

    run_powershell(
        runtime,
        &format!(
            "[Environment]::SetEnvironmentVariable('Path', {}, 'User')",
            ps_literal(&new_value)
        ),
    )?;
    Ok(())
}

/// Make sure `dir` is on the user's persistent `Path`, adding it if needed.
///
/// Failures never abort the calling operation; they are reported together
/// with instructions for adding the directory manually.
#[tracing::instrument(skip(runtime))]
pub fn ensure_in_user_path<R: Runtime>(runtime: &R, dir: &Path) -> PathUpdate {
    let result = query_user_path(runtime).and_then(|current| {
        if contains_dir(&current, dir, Os::Windows) {
            return Ok(PathUpdate::AlreadyPresent);
        }
        println!("📍 Adding {} to your PATH...", dir.display());
        append_to_user_path(runtime, dir, &current)?;
        Ok(PathUpdate::Added)
    });

    match result {
        Ok(PathUpdate::AlreadyPresent) => {
            println!("✅ {} is already in your PATH", dir.display());
            PathUpdate::AlreadyPresent
        }
        Ok(update) => {
            println!("✅ Successfully added to PATH! Restart your terminal to use the new PATH.");
            update
        }
        Err(e) => {
            debug!("Failed to update user PATH: {:#}", e);
            println!("⚠️  Failed to automatically add to PATH: {:#}", e);
            println!(
                "⚠️  Please manually add {} to your PATH environment variable",
                dir.display()
            );
            PathUpdate::Failed(format!("{:#}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{CommandOutput, MockRuntime};
    use std::path::PathBuf;

    fn ok_output(stdout: &str) -> CommandOutput {
        CommandOutput {
            success: true,
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    #[test]
    fn test_split_path() {
        assert_eq!(
            split_path("/usr/bin::/usr/local/bin:", Os::Linux),
            vec!["/usr/bin", "/usr/local/bin"]
        );
        assert_eq!(
            split_path(r"C:\Windows;;C:\Users\me\bin", Os::Windows),
            vec![r"C:\Windows", r"C:\Users\me\bin"]
        );
    }

    #[test]
    fn test_contains_dir_unix() {
        let path = "/usr/bin:/usr/local/bin/";
        assert!(contains_dir(path, Path::new("/usr/local/bin"), Os::Linux));
        assert!(!contains_dir(path, Path::new("/usr/local"), Os::Linux));
        assert!(!contains_dir(path, Path::new("/USR/BIN"), Os::Linux));
    }

    #[test]
    fn test_contains_dir_windows_ignores_case_and_trailing_slash() {
        let path = r"C:\Windows;C:\Users\Me\bin\";
        assert!(contains_dir(path, Path::new(r"c:\users\me\bin"), Os::Windows));
        assert!(!contains_dir(path, Path::new(r"C:\Users\Me"), Os::Windows));
    }

    #[test]
    fn test_warn_if_not_on_path() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Ok("/usr/bin:/bin".to_string()));

        assert!(warn_if_not_on_path(&runtime, Path::new("/usr/bin"), Os::Linux));
        assert!(!warn_if_not_on_path(&runtime, Path::new("/opt/bin"), Os::Linux));
    }

    #[test]
    fn test_ps_literal_escapes_quotes() {
        assert_eq!(ps_literal(r"C:\Users\O'Neil\bin"), r"'C:\Users\O''Neil\bin'");
    }

    #[test]
    fn test_ensure_in_user_path_already_present() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_command()
            .times(1)
            .returning(|_, _| Ok(ok_output("C:\\Windows;C:\\Users\\me\\bin\r\n")));

        let update = ensure_in_user_path(&runtime, &PathBuf::from(r"C:\Users\me\bin"));
        assert_eq!(update, PathUpdate::AlreadyPresent);
    }

    #[test]
    fn test_ensure_in_user_path_appends() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_command()
            .withf(|program, args| {
                program == "powershell" && args.last().is_some_and(|s| s.contains("GetEnvironmentVariable"))
            })
            .times(1)
            .returning(|_, _| Ok(ok_output("C:\\Windows;")));
        runtime
            .expect_run_command()
            .withf(|_, args| {
                args.last().is_some_and(|s| {
                    s.contains("SetEnvironmentVariable")
                        && s.contains(r"'C:\Windows;C:\Users\me\bin'")
                })
            })
            .times(1)
            .returning(|_, _| Ok(ok_output("")));

        let update = ensure_in_user_path(&runtime, &PathBuf::from(r"C:\Users\me\bin"));
        assert_eq!(update, PathUpdate::Added);
    }

    #[test]
    fn test_ensure_in_user_path_failure_is_reported_not_raised() {
        let mut runtime = MockRuntime::new();
        runtime.expect_run_command().returning(|_, _| {
            Ok(CommandOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: "access denied".to_string(),
            })
        });

        let update = ensure_in_user_path(&runtime, &PathBuf::from(r"C:\Users\me\bin"));
        match update {
            PathUpdate::Failed(reason) => assert!(reason.contains("access denied")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
