use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::platform::Os;
use crate::runtime::Runtime;

/// Name of the registry file inside the config directory.
pub const REGISTRY_FILE: &str = "config.json";

/// Resolved locations and target OS for one `lnb` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding `config.json`.
    pub config_dir: PathBuf,
    /// Directory where links and wrapper scripts are created.
    pub bin_dir: PathBuf,
    pub os: Os,
}

impl Settings {
    /// Resolve settings from explicit overrides, falling back to per-OS defaults.
    #[tracing::instrument(skip(runtime))]
    pub fn resolve<R: Runtime>(
        runtime: &R,
        os: Os,
        bin_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let config_dir = match config_dir {
            Some(path) => path,
            None => default_config_dir(runtime)?,
        };
        let bin_dir = match bin_dir {
            Some(path) => path,
            None => default_bin_dir(runtime, os)?,
        };
        debug!("Using config dir {:?} and bin dir {:?}", config_dir, bin_dir);

        Ok(Self {
            config_dir,
            bin_dir,
            os,
        })
    }

    pub fn registry_path(&self) -> PathBuf {
        self.config_dir.join(REGISTRY_FILE)
    }
}

/// Get the default registry directory: `~/.lnb`
#[tracing::instrument(skip(runtime))]
pub fn default_config_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let home_dir = runtime
        .home_dir()
        .context("Unable to get home directory")?;
    Ok(home_dir.join(".lnb"))
}

/// Get the default directory for links and wrapper scripts.
///
/// - macOS / Linux: `/usr/local/bin`
/// - Windows: `%USERPROFILE%\bin`
#[tracing::instrument(skip(runtime))]
pub fn default_bin_dir<R: Runtime>(runtime: &R, os: Os) -> Result<PathBuf> {
    match os {
        Os::Darwin | Os::Linux => Ok(PathBuf::from("/usr/local/bin")),
        Os::Windows => {
            let profile = match runtime.env_var("USERPROFILE") {
                Ok(value) if !value.is_empty() => PathBuf::from(value),
                _ => runtime
                    .home_dir()
                    .context("Unable to determine the user profile directory")?,
            };
            Ok(profile.join("bin"))
        }
    }
}
