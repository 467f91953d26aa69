//! Creating and removing links and wrapper scripts.
//!
//! A [`Linker`] owns the bookkeeping shared by binaries and aliases:
//! - target paths in the link directory, per OS
//! - stale registry entries whose target has vanished
//! - conflicts with files `lnb` did not create
//! - ownership checks before anything is deleted

mod alias;
mod binary;

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use std::path::{Path, PathBuf};

use crate::path_env;
use crate::paths::Settings;
use crate::platform::Os;
use crate::registry::{Entry, Registry, RegistryStore};
use crate::runtime::Runtime;

/// What a successful install produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub name: String,
    pub target: PathBuf,
}

/// Which kind of artifact an operation works on; drives message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Binary,
    Alias,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Binary => "binary",
            Kind::Alias => "alias",
        }
    }

    fn with_article(self) -> &'static str {
        match self {
            Kind::Binary => "a binary",
            Kind::Alias => "an alias",
        }
    }

    /// The `lnb` subcommand that undoes this kind of install.
    fn remove_command(self) -> &'static str {
        match self {
            Kind::Binary => "remove",
            Kind::Alias => "unalias",
        }
    }

    fn matches(self, entry: &Entry) -> bool {
        entry.is_alias() == matches!(self, Kind::Alias)
    }
}

pub struct Linker<'a, R: Runtime> {
    runtime: &'a R,
    settings: &'a Settings,
    store: RegistryStore<'a, R>,
}

impl<'a, R: Runtime> Linker<'a, R> {
    pub fn new(runtime: &'a R, settings: &'a Settings) -> Self {
        Self {
            runtime,
            settings,
            store: RegistryStore::new(runtime, settings.registry_path()),
        }
    }

    pub fn os(&self) -> Os {
        self.settings.os
    }

    pub fn bin_dir(&self) -> &Path {
        &self.settings.bin_dir
    }

    /// Load the registry for read-only use.
    pub fn registry(&self) -> Result<Registry> {
        self.load_registry()
    }

    /// Name a binary is installed under: the file name, or the stem on Windows.
    pub fn link_name(&self, source: &Path) -> Result<String> {
        let name = if self.os().is_windows() {
            source.file_stem()
        } else {
            source.file_name()
        };
        name.map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| anyhow!("Cannot determine a command name from {}", source.display()))
    }

    pub fn target_for_binary(&self, name: &str) -> PathBuf {
        match self.os() {
            Os::Windows => self.bin_dir().join(format!("{}.cmd", name)),
            Os::Darwin | Os::Linux => self.bin_dir().join(name),
        }
    }

    pub fn target_for_alias(&self, name: &str) -> PathBuf {
        match self.os() {
            Os::Windows => self.bin_dir().join(format!("{}.bat", name)),
            Os::Darwin | Os::Linux => self.bin_dir().join(name),
        }
    }

    fn load_registry(&self) -> Result<Registry> {
        self.store.load().context("failed to load config")
    }

    /// Persist the registry after the file system change already happened.
    ///
    /// The link exists at this point, so a failed save is only reported.
    fn save_or_warn(&self, registry: &Registry) {
        if let Err(e) = self.store.save(registry) {
            debug!("Failed to save registry {:?}: {:#}", self.store.path(), e);
            println!("Warning: failed to update config: {:#}", e);
        }
    }

    /// Dangling symlinks count as present.
    fn target_present(&self, path: &Path) -> bool {
        self.runtime.exists(path) || self.runtime.is_symlink(path)
    }

    /// Fail if `name` is installed; drop its entry if the target has vanished.
    fn check_not_installed(&self, registry: &mut Registry, name: &str, kind: Kind) -> Result<()> {
        let Some(entry) = registry.get(name) else {
            return Ok(());
        };

        if self.target_present(entry.target()) {
            bail!(
                "{} '{}' is already installed. Use 'lnb {} {}' first to reinstall",
                kind.label(),
                name,
                kind.remove_command(),
                name
            );
        }

        println!(
            "Warning: Config shows '{}' as installed but target file '{}' doesn't exist. Cleaning up config entry.",
            name,
            entry.target().display()
        );
        registry.remove(name);
        if let Err(e) = self.store.save(registry) {
            println!("Warning: failed to clean up config: {:#}", e);
        }
        Ok(())
    }

    /// Fail if something `lnb` does not know about occupies `target`.
    fn check_no_conflict(&self, target: &Path, name: &str, kind: Kind) -> Result<()> {
        if self.target_present(target) {
            bail!(
                "file already exists at {}. Please remove it manually or use 'lnb {} {}' if it was installed by LNB",
                target.display(),
                kind.remove_command(),
                name
            );
        }
        Ok(())
    }

    /// Find the entry for `name` and make sure it owns `expected`.
    fn owned_entry<'r>(
        &self,
        registry: &'r Registry,
        name: &str,
        expected: &Path,
        kind: Kind,
    ) -> Result<&'r Entry> {
        let entry = registry
            .get(name)
            .ok_or_else(|| anyhow!("{} '{}' was not installed by LNB", kind.label(), name))?;

        if !kind.matches(entry) {
            let other = if entry.is_alias() { Kind::Alias } else { Kind::Binary };
            bail!(
                "'{}' is {}. Use 'lnb {} {}' instead",
                name,
                other.with_article(),
                other.remove_command(),
                name
            );
        }

        if entry.target() != expected {
            bail!(
                "{} '{}' target path mismatch: expected {}, found {}",
                kind.label(),
                name,
                expected.display(),
                entry.target().display()
            );
        }

        Ok(entry)
    }

    /// Delete a recorded target. A target that is already gone is not an error.
    fn remove_target(&self, target: &Path) -> Result<()> {
        if !self.target_present(target) {
            println!(
                "Warning: target file '{}' was already removed. Cleaning up config entry.",
                target.display()
            );
            return Ok(());
        }
        self.runtime
            .remove_file(target)
            .with_context(|| format!("failed to remove {}", target.display()))
    }

    fn ensure_bin_dir(&self) -> Result<()> {
        if !self.runtime.exists(self.bin_dir()) {
            debug!("Creating link directory {:?}", self.bin_dir());
            self.runtime
                .create_dir_all(self.bin_dir())
                .with_context(|| format!("error creating bin dir {}", self.bin_dir().display()))?;
        }
        Ok(())
    }

    /// Make the link directory reachable and report anything that hides `name`.
    fn announce_on_path(&self, name: &str, target: &Path) {
        if self.os().is_windows() {
            path_env::ensure_in_user_path(self.runtime, self.bin_dir());
            return;
        }
        if path_env::warn_if_not_on_path(self.runtime, self.bin_dir(), self.os()) {
            self.warn_if_shadowed(name, target);
        }
    }

    /// Warn when `name` resolves to something other than `target` on `PATH`.
    fn warn_if_shadowed(&self, name: &str, target: &Path) {
        let Some(found) = self.runtime.which(name) else {
            return;
        };
        let resolve = |p: &Path| {
            self.runtime
                .canonicalize(p)
                .unwrap_or_else(|_| p.to_path_buf())
        };
        if resolve(&found) != resolve(target) {
            debug!("{} resolves to {:?} instead of {:?}", name, found, target);
            println!(
                "⚠️  '{}' currently resolves to {}, which comes before {} on your PATH",
                name,
                found.display(),
                target.display()
            );
        }
    }
}
