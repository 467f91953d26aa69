use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Marker prefixed to `source_path` for alias entries.
pub const ALIAS_PREFIX: &str = "alias:";

/// One link or wrapper script created by `lnb`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    /// Absolute source binary, or `alias:<command>` for aliases.
    pub source_path: String,
    /// The link or script `lnb` created.
    pub target_path: PathBuf,
    pub installed_at: DateTime<Utc>,
}

/// Decoded form of an entry's `source_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Binary { source: PathBuf },
    Alias { command: String },
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Binary { .. } => "binary",
            EntryKind::Alias { .. } => "alias",
        }
    }
}

impl Entry {
    pub fn binary(name: impl Into<String>, source: PathBuf, target: PathBuf) -> Self {
        Self {
            name: name.into(),
            source_path: source.to_string_lossy().into_owned(),
            target_path: target,
            installed_at: Utc::now(),
        }
    }

    pub fn alias(name: impl Into<String>, command: &str, target: PathBuf) -> Self {
        Self {
            name: name.into(),
            source_path: format!("{}{}", ALIAS_PREFIX, command),
            target_path: target,
            installed_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self.source_path.strip_prefix(ALIAS_PREFIX) {
            Some(command) => EntryKind::Alias {
                command: command.to_string(),
            },
            None => EntryKind::Binary {
                source: PathBuf::from(&self.source_path),
            },
        }
    }

    pub fn is_alias(&self) -> bool {
        self.source_path.starts_with(ALIAS_PREFIX)
    }

    pub fn target(&self) -> &Path {
        &self.target_path
    }

    /// Installation time in local time, `YYYY-MM-DD HH:MM:SS`.
    pub fn installed_at_display(&self) -> String {
        self.installed_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
