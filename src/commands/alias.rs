use anyhow::{Context, Result, bail};

use crate::alias::{normalize_command, validate_inputs};
use crate::linker::Linker;
use crate::paths::Settings;
use crate::runtime::Runtime;

/// Create an alias. With fewer than two arguments both parts are prompted for.
#[tracing::instrument(skip(runtime, settings))]
pub fn alias<R: Runtime>(
    runtime: R,
    name: Option<String>,
    command: Vec<String>,
    settings: Settings,
) -> Result<()> {
    let (name, command) = match name {
        Some(name) if !command.is_empty() => (name, command.join(" ")),
        _ => (
            runtime.prompt_line("Enter alias name: ")?,
            runtime.prompt_line("Enter command: ")?,
        ),
    };
    validate_inputs(&name, &command)?;

    let normalized = normalize_command(&runtime, &command)
        .with_context(|| format!("invalid command '{}'", command))?;

    Linker::new(&runtime, &settings).install_alias(&name, &normalized)?;
    println!(
        "✅ Successfully created alias '{}' for command '{}'",
        name, normalized
    );
    Ok(())
}

/// Remove an alias created by `lnb`.
#[tracing::instrument(skip(runtime, settings))]
pub fn unalias<R: Runtime>(runtime: R, name: &str, settings: Settings) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Alias name cannot be empty.");
    }

    Linker::new(&runtime, &settings).remove_alias(name)?;
    println!("✅ Successfully removed alias '{}'", name);
    Ok(())
}
