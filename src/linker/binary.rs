use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::path::Path;

use crate::registry::Entry;
use crate::runtime::Runtime;
use crate::wrapper;

use super::{Kind, LinkOutcome, Linker};

impl<'a, R: Runtime> Linker<'a, R> {
    /// Make the binary at `source` (absolute) callable by name.
    ///
    /// Unix gets a symlink in the link directory; Windows gets a `.cmd`
    /// wrapper and the link directory is added to the user `Path`.
    #[tracing::instrument(skip(self))]
    pub fn install_binary(&self, source: &Path) -> Result<LinkOutcome> {
        if !self.runtime.exists(source) {
            bail!("file '{}' does not exist", source.display());
        }

        if self.os().sets_permissions() && !self.runtime.is_executable(source)? {
            bail!(
                "file '{}' is not executable: file does not have execute permissions",
                source.display()
            );
        }

        let name = self.link_name(source)?;
        let target = self.target_for_binary(&name);
        debug!("Installing {:?} as {:?}", source, target);

        let mut registry = self.load_registry()?;
        self.check_not_installed(&mut registry, &name, Kind::Binary)?;
        self.check_no_conflict(&target, &name, Kind::Binary)?;

        self.ensure_bin_dir()?;

        if self.os().is_windows() {
            let script = wrapper::windows_binary_cmd(&source.to_string_lossy());
            self.runtime
                .write(&target, script.as_bytes())
                .context("failed to write wrapper")?;
            println!("Installed: {}", target.display());
        } else {
            self.runtime
                .symlink(source, &target)
                .with_context(|| self.symlink_failure_hint())?;
            println!("Installed: {} -> {}", target.display(), source.display());
        }
        info!("Installed {} at {:?}", name, target);

        self.announce_on_path(&name, &target);

        registry.upsert(Entry::binary(&name, source.to_path_buf(), target.clone()));
        self.save_or_warn(&registry);

        Ok(LinkOutcome { name, target })
    }

    /// Remove the link or wrapper recorded for `name`.
    #[tracing::instrument(skip(self))]
    pub fn remove_binary(&self, name: &str) -> Result<LinkOutcome> {
        let target = self.target_for_binary(name);

        let mut registry = self.load_registry()?;
        self.owned_entry(&registry, name, &target, Kind::Binary)?;

        self.remove_target(&target)?;
        println!("Removed: {}", target.display());
        info!("Removed {} from {:?}", name, target);

        registry.remove(name);
        self.save_or_warn(&registry);

        Ok(LinkOutcome {
            name: name.to_string(),
            target,
        })
    }

    fn symlink_failure_hint(&self) -> String {
        if self.runtime.is_privileged() {
            "failed to install".to_string()
        } else {
            format!(
                "failed to install (writing to {} may require sudo, or choose another directory with --bin-dir)",
                self.bin_dir().display()
            )
        }
    }
}
