//! Quote-aware handling of command strings.
//!
//! Tokens keep their surrounding quotes so a command can be rebuilt verbatim
//! after individual arguments have been rewritten.

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::platform::Os;
use crate::runtime::{Runtime, absolutize};

/// Split a command on unquoted spaces and tabs.
///
/// Single and double quotes group words; the quote characters stay in the
/// token, and the other kind of quote is literal inside a quoted run.
pub fn split_args(command: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in command.chars() {
        match ch {
            '"' | '\'' => {
                match quote {
                    None => quote = Some(ch),
                    Some(open) if open == ch => quote = None,
                    Some(_) => {}
                }
                current.push(ch);
            }
            ' ' | '\t' if quote.is_none() => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Rebuild a command from tokens.
pub fn join_args(args: &[String]) -> String {
    args.join(" ")
}

/// Strip one matching pair of surrounding quotes.
///
/// Returns the inner text and the quote character that was removed.
pub fn unquote(token: &str) -> (&str, Option<char>) {
    for q in ['"', '\''] {
        if token.len() >= 2 && token.starts_with(q) && token.ends_with(q) {
            return (&token[1..token.len() - 1], Some(q));
        }
    }
    (token, None)
}

/// Wrap `text` in `quote`, or return it unchanged when `quote` is `None`.
pub fn requote(text: &str, quote: Option<char>) -> String {
    match quote {
        Some(q) => format!("{q}{text}{q}"),
        None => text.to_string(),
    }
}

/// Expand a leading `~/` against `home`.
pub fn expand_tilde(path: &str, home: Option<&Path>) -> Option<PathBuf> {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => Some(home.join(rest)),
        (Some(_), None) => None,
        (None, _) => Some(PathBuf::from(path)),
    }
}

/// Whether a command name refers to a file rather than something on `PATH`.
pub fn looks_like_path(name: &str) -> bool {
    name.contains('/') || name.contains('\\')
}

/// Characters rejected in bare command names.
pub const DANGEROUS_CHARS: &[char] = &['{', '}', '[', ']', '(', ')', '<', '>', '|', '&', ';'];

pub fn has_dangerous_chars(name: &str) -> bool {
    name.contains(DANGEROUS_CHARS)
}

/// Heuristic for arguments that may be relative file references.
///
/// Explicit `./` and `../` prefixes always qualify. Otherwise any dotted word
/// (`app.jar`, `script.js`) qualifies unless it is absolute, a URL, or, on
/// Windows, drive-qualified.
pub fn looks_relative(arg: &str, os: Os) -> bool {
    if arg.starts_with("./") || arg.starts_with("../") {
        return true;
    }
    if os.is_windows() {
        if arg.starts_with(".\\") || arg.starts_with("..\\") {
            return true;
        }
        return arg.contains('.') && !arg.contains(':') && !arg.contains("://");
    }
    arg.contains('.') && !arg.starts_with('/') && !arg.contains("://")
}

/// Rewrite relative file arguments that exist into absolute paths.
///
/// Quotes around a rewritten argument are preserved. On Windows an unquoted
/// result containing spaces gets double quotes. Arguments that do not resolve
/// to an existing file are left untouched.
#[tracing::instrument(skip(runtime))]
pub fn absolutize_relative_args<R: Runtime>(runtime: &R, command: &str, os: Os) -> Result<String> {
    let mut args = split_args(command);
    let cwd = runtime.current_dir()?;

    for arg in args.iter_mut() {
        let (inner, quote) = unquote(arg);
        if !looks_relative(inner, os) {
            continue;
        }

        let abs = absolutize(&cwd, Path::new(inner));
        if !runtime.exists(&abs) {
            continue;
        }

        let abs = abs.to_string_lossy().into_owned();
        debug!("Converted relative argument {:?} to {:?}", inner, abs);
        *arg = match quote {
            Some(_) => requote(&abs, quote),
            None if os.is_windows() && abs.contains(' ') => requote(&abs, Some('"')),
            None => abs,
        };
    }

    Ok(join_args(&args))
}
