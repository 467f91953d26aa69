use anyhow::{Result, bail};
use log::debug;
use std::path::{Path, PathBuf};

use crate::linker::Linker;
use crate::paths::Settings;
use crate::runtime::{Runtime, absolutize};
use crate::shell::expand_tilde;

/// Install a binary, prompting for its path when none is given.
#[tracing::instrument(skip(runtime, settings))]
pub fn install<R: Runtime>(runtime: R, path: Option<String>, settings: Settings) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => runtime.prompt_line("Enter path to binary: ")?,
    };
    if path.trim().is_empty() {
        bail!("File path cannot be empty.");
    }

    let source = resolve_source(&runtime, &path)?;
    debug!("Resolved {:?} to {:?}", path, source);

    let outcome = Linker::new(&runtime, &settings).install_binary(&source)?;
    println!("✅ Successfully installed '{}'", outcome.name);
    Ok(())
}

/// Remove a binary installed by `lnb`, given its name or its source path.
#[tracing::instrument(skip(runtime, settings))]
pub fn remove<R: Runtime>(runtime: R, name_or_path: &str, settings: Settings) -> Result<()> {
    if name_or_path.trim().is_empty() {
        bail!("Please specify a file to remove.");
    }

    let linker = Linker::new(&runtime, &settings);
    let abs = absolutize(&runtime.current_dir()?, Path::new(name_or_path));
    let name = linker.link_name(&abs)?;

    let outcome = linker.remove_binary(&name)?;
    println!("✅ Successfully removed '{}'", outcome.name);
    Ok(())
}

/// `lnb <path>`: install when the first argument names an existing file.
#[tracing::instrument(skip(runtime, settings))]
pub fn smart_install<R: Runtime>(runtime: R, arg: &str, settings: Settings) -> Result<()> {
    if !runtime.exists(Path::new(arg)) {
        bail!("File '{}' does not exist.", arg);
    }
    install(runtime, Some(arg.to_string()), settings)
}

/// Check that `path` exists and make it absolute.
fn resolve_source<R: Runtime>(runtime: &R, path: &str) -> Result<PathBuf> {
    let home = runtime.home_dir();
    let expanded = expand_tilde(path, home.as_deref()).unwrap_or_else(|| PathBuf::from(path));

    let abs = absolutize(&runtime.current_dir()?, &expanded);
    if !runtime.exists(&abs) {
        bail!("File '{}' does not exist.", path);
    }
    Ok(abs)
}
