//! Registry of everything `lnb` has created.
//!
//! The registry lives in `<config_dir>/config.json` and is the only authority
//! `lnb` consults before deleting a link or wrapper script: a file that is not
//! recorded here is never removed.

mod entry;

pub use entry::{ALIAS_PREFIX, Entry, EntryKind};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

pub const REGISTRY_VERSION: &str = "1.0";

/// On-disk registry contents
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Registry {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, deserialize_with = "deserialize_entries")]
    pub entries: Vec<Entry>,
}

fn default_version() -> String {
    REGISTRY_VERSION.to_string()
}

/// Older files keyed entries by name instead of storing a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntriesRepr {
    List(Vec<Entry>),
    ByName(BTreeMap<String, Entry>),
}

fn deserialize_entries<'de, D>(deserializer: D) -> Result<Vec<Entry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<EntriesRepr>::deserialize(deserializer)? {
        Some(EntriesRepr::List(list)) => list,
        Some(EntriesRepr::ByName(map)) => map.into_values().collect(),
        None => Vec::new(),
    })
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            version: default_version(),
            entries: Vec::new(),
        }
    }
}

impl Registry {
    /// Load the registry at `path`.
    ///
    /// A missing file is an empty registry. A file that cannot be parsed is
    /// an error, so the entries it holds are never overwritten.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        if !runtime.exists(path) {
            debug!("No registry at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Write the registry to `path`, creating its directory if needed.
    #[tracing::instrument(skip(self, runtime))]
    pub fn save<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !runtime.exists(parent)
        {
            runtime
                .create_dir_all(parent)
                .with_context(|| format!("Unable to create config directory {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        runtime
            .write(path, content.as_bytes())
            .with_context(|| format!("Unable to write config file {}", path.display()))
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert an entry, replacing any existing entry with the same name.
    pub fn upsert(&mut self, entry: Entry) {
        self.remove(&entry.name);
        self.entries.push(entry);
    }

    pub fn remove(&mut self, name: &str) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(index))
    }

    /// Entries sorted by name.
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Registry bound to a file location.
pub struct RegistryStore<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
}

impl<'a, R: Runtime> RegistryStore<'a, R> {
    pub fn new(runtime: &'a R, path: PathBuf) -> Self {
        Self { runtime, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Registry> {
        Registry::load(self.runtime, &self.path)
    }

    pub fn save(&self, registry: &Registry) -> Result<()> {
        registry.save(self.runtime, &self.path)
    }
}
