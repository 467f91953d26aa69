//! Validation and normalization of alias commands.

use anyhow::{Result, bail};
use log::debug;
use std::path::Path;

use crate::platform::Os;
use crate::runtime::{Runtime, absolutize};
use crate::shell::{
    expand_tilde, has_dangerous_chars, join_args, looks_like_path, requote, split_args, unquote,
};

/// Reject blank input and alias names that would escape the link directory.
pub fn validate_inputs(name: &str, command: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Alias name cannot be empty.");
    }
    if name.contains(['/', '\\']) {
        bail!("Alias name '{}' cannot contain path separators.", name);
    }
    if command.trim().is_empty() {
        bail!("Command cannot be empty.");
    }
    Ok(())
}

/// Resolve the executable of `command` and return the normalized command.
///
/// A path-like executable (relative, `~/`, or absolute) must exist and is
/// rewritten to its absolute form, quoted when it contains spaces. A bare
/// command name is kept as-is and left to `PATH` at run time, but must not
/// contain shell metacharacters.
#[tracing::instrument(skip(runtime))]
pub fn normalize_command<R: Runtime>(runtime: &R, command: &str) -> Result<String> {
    if command.is_empty() {
        bail!("command cannot be empty");
    }

    // An unquoted path with spaces such as "/Applications/Visual Studio Code.app"
    let mut args = if runtime.exists(Path::new(command)) {
        vec![command.to_string()]
    } else {
        split_args(command)
    };

    let Some(first) = args.first() else {
        bail!("could not parse command");
    };

    let (name, quote) = unquote(first);
    debug!("Executable token {:?} (quote: {:?})", name, quote);

    let home = runtime.home_dir();
    let Some(expanded) = expand_tilde(name, home.as_deref()) else {
        bail!("could not get home directory");
    };
    let expanded_str = expanded.to_string_lossy().into_owned();

    if !looks_like_path(&expanded_str) {
        println!(
            "💻 Command '{}' will be executed as-is (assuming it's available in PATH or installed)",
            name
        );
        if has_dangerous_chars(name) {
            bail!("command '{}' contains potentially dangerous characters", name);
        }
        return Ok(command.to_string());
    }

    let abs = absolutize(&runtime.current_dir()?, &expanded);
    if !runtime.exists(&abs) {
        bail!("file not found: {}", abs.display());
    }

    let abs_str = abs.to_string_lossy().into_owned();
    args[0] = match quote {
        Some(_) => requote(&abs_str, quote),
        None if abs_str.contains(' ') => requote(&abs_str, Some('"')),
        None => abs_str,
    };

    println!("📁 Validated file path: {}", abs.display());
    Ok(join_args(&args))
}

/// Check that the executable of an already-normalized command can be run on `os`.
#[tracing::instrument(skip(runtime))]
pub fn validate_for_os<R: Runtime>(runtime: &R, command: &str, os: Os) -> Result<()> {
    if command.trim().is_empty() {
        bail!("empty command");
    }

    let args = split_args(command);
    let Some(first) = args.first() else {
        bail!("could not parse command");
    };
    let (name, _) = unquote(first);

    let is_path = if os.is_windows() {
        looks_like_path(name)
    } else {
        name.contains('/')
    };

    if !is_path {
        if has_dangerous_chars(name) {
            bail!("command '{}' contains invalid characters", name);
        }
        return Ok(());
    }

    let abs = absolutize(&runtime.current_dir()?, Path::new(name));
    if !runtime.exists(&abs) {
        bail!("command '{}' not found", name);
    }

    // App bundles are directories launched through `open -a`
    if os == Os::Darwin && name.ends_with(".app") {
        return Ok(());
    }

    if os.sets_permissions() && runtime.is_file(&abs) && !runtime.is_executable(&abs)? {
        bail!("file does not have execute permissions");
    }

    Ok(())
}
