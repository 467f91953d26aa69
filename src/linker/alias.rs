use anyhow::{Context, Result};
use log::info;

use crate::alias::validate_for_os;
use crate::platform::Os;
use crate::registry::Entry;
use crate::runtime::Runtime;
use crate::shell::absolutize_relative_args;
use crate::wrapper;

use super::{Kind, LinkOutcome, Linker};

const SCRIPT_MODE: u32 = 0o755;

impl<'a, R: Runtime> Linker<'a, R> {
    /// Write a wrapper script named `name` that runs `command`.
    ///
    /// The script gets absolute paths for relative file arguments; the
    /// registry keeps `command` as given.
    #[tracing::instrument(skip(self))]
    pub fn install_alias(&self, name: &str, command: &str) -> Result<LinkOutcome> {
        validate_for_os(self.runtime, command, self.os())
            .with_context(|| format!("invalid command '{}'", command))?;

        let target = self.target_for_alias(name);

        let mut registry = self.load_registry()?;
        self.check_not_installed(&mut registry, name, Kind::Alias)?;
        self.check_no_conflict(&target, name, Kind::Alias)?;

        let converted = absolutize_relative_args(self.runtime, command, self.os())?;
        let script = match self.os() {
            Os::Darwin => wrapper::unix_script(&wrapper::wrap_app_bundle(&converted)),
            Os::Linux => wrapper::unix_script(&converted),
            Os::Windows => wrapper::windows_alias_bat(&converted),
        };

        self.ensure_bin_dir()?;
        self.runtime
            .write(&target, script.as_bytes())
            .context("failed to create alias script")?;
        if self.os().sets_permissions() {
            self.runtime
                .set_permissions(&target, SCRIPT_MODE)
                .context("failed to make alias script executable")?;
        }

        println!("Created alias: {} -> {}", name, converted);
        info!("Created alias {} at {:?}", name, target);

        self.announce_on_path(name, &target);

        registry.upsert(Entry::alias(name, command, target.clone()));
        self.save_or_warn(&registry);

        Ok(LinkOutcome {
            name: name.to_string(),
            target,
        })
    }

    /// Delete the wrapper script recorded for alias `name`.
    #[tracing::instrument(skip(self))]
    pub fn remove_alias(&self, name: &str) -> Result<LinkOutcome> {
        let target = self.target_for_alias(name);

        let mut registry = self.load_registry()?;
        self.owned_entry(&registry, name, &target, Kind::Alias)?;

        self.remove_target(&target)?;
        println!("Removed alias: {}", name);
        info!("Removed alias {} from {:?}", name, target);

        registry.remove(name);
        self.save_or_warn(&registry);

        Ok(LinkOutcome {
            name: name.to_string(),
            target,
        })
    }
}
