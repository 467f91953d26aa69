use anyhow::Result;
use log::debug;
use std::fmt::Write as _;

use crate::linker::Linker;
use crate::paths::Settings;
use crate::registry::{EntryKind, Registry};
use crate::runtime::Runtime;

/// List every binary and alias recorded in the registry.
#[tracing::instrument(skip(runtime, settings))]
pub fn list<R: Runtime>(runtime: R, settings: Settings) -> Result<()> {
    debug!("Listing entries from {:?}", settings.registry_path());
    let registry = Linker::new(&runtime, &settings).registry()?;
    print!("{}", format_entries(&registry));
    Ok(())
}

/// Render the registry the way `lnb list` prints it, sorted by name.
pub fn format_entries(registry: &Registry) -> String {
    if registry.is_empty() {
        return "No binaries or aliases installed by LNB.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Binaries and aliases installed by LNB ({}):\n", registry.len());
    for entry in registry.sorted_entries() {
        let kind = entry.kind();
        let _ = writeln!(out, "  {}", entry.name);
        let _ = writeln!(out, "    Type:      {}", kind.label());
        match kind {
            EntryKind::Alias { command } => {
                let _ = writeln!(out, "    Command:   {}", command);
            }
            EntryKind::Binary { source } => {
                let _ = writeln!(out, "    Source:    {}", source.display());
            }
        }
        let _ = writeln!(out, "    Target:    {}", entry.target().display());
        let _ = writeln!(out, "    Installed: {}", entry.installed_at_display());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Os;
    use crate::registry::Entry;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{test_bin_dir, test_config_dir};
    use std::path::PathBuf;

    #[test]
    fn test_format_empty() {
        assert_eq!(
            format_entries(&Registry::default()),
            "No binaries or aliases installed by LNB.\n"
        );
    }

    #[test]
    fn test_format_entries_sorted_with_kinds() {
        let mut registry = Registry::default();
        registry.upsert(Entry::binary(
            "rg",
            PathBuf::from("/opt/rg/rg"),
            PathBuf::from("/usr/local/bin/rg"),
        ));
        registry.upsert(Entry::alias(
            "ll",
            "ls -la",
            PathBuf::from("/usr/local/bin/ll"),
        ));

        let text = format_entries(&registry);
        assert!(text.starts_with("Binaries and aliases installed by LNB (2):\n\n  ll\n"));
        assert!(text.contains("    Type:      alias\n    Command:   ls -la\n"));
        assert!(text.contains("    Type:      binary\n    Source:    /opt/rg/rg\n"));
        assert!(text.find("  ll\n").unwrap() < text.find("  rg\n").unwrap());
        assert_eq!(text.matches("    Installed: ").count(), 2);
    }

    #[test]
    fn test_list_with_missing_registry() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| false);

        let settings = Settings {
            config_dir: test_config_dir(),
            bin_dir: test_bin_dir(),
            os: Os::Linux,
        };
        assert!(list(runtime, settings).is_ok());
    }
}
