//! Wrapper scripts written into the link directory.

use crate::shell::{join_args, requote, split_args, unquote};

/// Bash script that forwards all arguments to `command`.
pub fn unix_script(command: &str) -> String {
    format!("#!/bin/bash\n{} \"$@\"\n", command)
}

/// `.cmd` wrapper that runs an installed binary by absolute path.
pub fn windows_binary_cmd(abs_path: &str) -> String {
    format!("@echo off\n\"{}\" %*\n", abs_path)
}

/// `.bat` wrapper for an alias command.
pub fn windows_alias_bat(command: &str) -> String {
    format!("@echo off\n{} %*\n", command)
}

/// Launch macOS application bundles through `open -a`.
///
/// Commands whose executable is not a `.app` bundle are returned unchanged.
pub fn wrap_app_bundle(command: &str) -> String {
    let args = split_args(command.trim());
    let Some(first) = args.first() else {
        return command.to_string();
    };

    let (app, quote) = unquote(first);
    if !app.ends_with(".app") {
        return command.trim().to_string();
    }

    let app = match quote {
        Some(_) => first.clone(),
        None if app.contains(' ') => requote(app, Some('"')),
        None => app.to_string(),
    };

    let mut wrapped = vec!["open".to_string(), "-a".to_string(), app];
    wrapped.extend(args[1..].iter().cloned());
    join_args(&wrapped)
}
