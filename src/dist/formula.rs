//! Homebrew formula for the macOS release archives.

use anyhow::{Context, Result, bail};
use log::debug;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::path::Path;

use crate::platform::{Arch, Os, Platform};
use crate::runtime::Runtime;

pub const HOMEPAGE: &str = "https://github.com/muthuishere/lnb";
pub const DESCRIPTION: &str = "A cross-platform utility that makes command-line tools accessible from anywhere by creating symbolic links or wrapper scripts in your system's PATH";

/// Platforms the formula ships archives for.
pub const PLATFORMS: [Platform; 2] = [
    Platform::new(Os::Darwin, Arch::Arm64),
    Platform::new(Os::Darwin, Arch::Amd64),
];

/// One downloadable archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaEntry {
    pub platform: Platform,
    pub url: String,
    /// Lowercase hex SHA-256 of the archive; `None` until computed.
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub version: String,
    pub entries: Vec<FormulaEntry>,
}

/// Release archive name, e.g. `lnb-darwin-arm64.zip`.
pub fn archive_name(platform: &Platform) -> String {
    format!("lnb-{}.zip", platform.release_tag())
}

pub fn download_url(version: &str, platform: &Platform) -> String {
    format!(
        "{}/releases/download/v{}/{}",
        HOMEPAGE,
        version,
        archive_name(platform)
    )
}

/// Hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

impl Formula {
    /// Table for `version` (a leading `v` is ignored), without checksums.
    pub fn new(version: &str) -> Self {
        let version = version.strip_prefix('v').unwrap_or(version).to_string();
        let entries = PLATFORMS
            .iter()
            .map(|platform| FormulaEntry {
                platform: *platform,
                url: download_url(&version, platform),
                sha256: None,
            })
            .collect();
        Self { version, entries }
    }

    /// Fill in checksums from the archives in `dist_dir`.
    #[tracing::instrument(skip(self, runtime))]
    pub fn with_checksums_from<R: Runtime>(mut self, runtime: &R, dist_dir: &Path) -> Result<Self> {
        for entry in &mut self.entries {
            let archive = dist_dir.join(archive_name(&entry.platform));
            if !runtime.exists(&archive) {
                bail!("Release archive not found: {}", archive.display());
            }
            let bytes = runtime
                .read(&archive)
                .with_context(|| format!("Failed to read {}", archive.display()))?;
            let digest = sha256_hex(&bytes);
            debug!("{:?}: sha256 {}", archive, digest);
            entry.sha256 = Some(digest);
        }
        Ok(self)
    }

    /// The archive for `platform`, or `None` if the formula does not ship one.
    pub fn select(&self, platform: &Platform) -> Option<&FormulaEntry> {
        self.entries.iter().find(|e| e.platform == *platform)
    }

    /// Render the Ruby formula. Every entry must have a checksum.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "class Lnb < Formula");
        let _ = writeln!(out, "  desc \"{}\"", DESCRIPTION);
        let _ = writeln!(out, "  homepage \"{}\"", HOMEPAGE);
        let _ = writeln!(out, "  version \"{}\"", self.version);
        out.push('\n');

        for (i, entry) in self.entries.iter().enumerate() {
            let Some(sha256) = &entry.sha256 else {
                bail!("Missing checksum for {}", archive_name(&entry.platform));
            };
            let keyword = if i == 0 { "if" } else { "elsif" };
            let _ = writeln!(out, "  {} {}", keyword, condition(&entry.platform)?);
            let _ = writeln!(out, "    url \"{}\"", entry.url);
            let _ = writeln!(out, "    sha256 \"{}\"", sha256);
        }
        if !self.entries.is_empty() {
            let _ = writeln!(out, "  end");
            out.push('\n');
        }

        out.push_str("  def install\n    bin.install \"lnb\"\n  end\n\n");
        out.push_str("  test do\n    system \"#{bin}/lnb\", \"--version\"\n  end\nend\n");
        Ok(out)
    }
}

/// Homebrew predicate matching `platform`.
fn condition(platform: &Platform) -> Result<&'static str> {
    Ok(match (platform.os, platform.arch) {
        (Os::Darwin, Arch::Arm64) => "OS.mac? && Hardware::CPU.arm?",
        (Os::Darwin, Arch::Amd64) => "OS.mac? && Hardware::CPU.intel?",
        (Os::Linux, Arch::Arm64) => "OS.linux? && Hardware::CPU.arm?",
        (Os::Linux, Arch::Amd64) => "OS.linux? && Hardware::CPU.intel?",
        (Os::Windows, _) => bail!("Homebrew does not support {}", platform),
    })
}
