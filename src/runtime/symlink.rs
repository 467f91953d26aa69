//! Creating and inspecting links.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn symlink_impl(&self, original: &Path, link: &Path) -> Result<()> {
        #[cfg(unix)]
        let created = std::os::unix::fs::symlink(original, link);
        #[cfg(windows)]
        let created = std::os::windows::fs::symlink_file(original, link);

        created.with_context(|| {
            format!(
                "Failed to link {} to {}",
                link.display(),
                original.display()
            )
        })
    }

    /// True for any symlink, including one whose target is gone.
    pub(crate) fn is_symlink_impl(&self, path: &Path) -> bool {
        path.symlink_metadata()
            .is_ok_and(|meta| meta.file_type().is_symlink())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn canonicalize_impl(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("Failed to resolve {}", path.display()))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_link_points_at_source() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let source = dir.path().join("mytool");
        runtime.write(&source, b"#!/bin/sh\n").unwrap();

        let link = dir.path().join("link");
        runtime.symlink(&source, &link).unwrap();

        assert!(runtime.is_symlink(&link));
        assert!(!runtime.is_symlink(&source));
        assert_eq!(
            runtime.canonicalize(&link).unwrap(),
            runtime.canonicalize(&source).unwrap()
        );

        runtime.remove_file(&link).unwrap();
        assert!(runtime.exists(&source));
    }

    #[test]
    fn test_dangling_link_is_symlink_but_not_exists() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let link = dir.path().join("dangling");
        runtime.symlink(&dir.path().join("gone"), &link).unwrap();

        assert!(runtime.is_symlink(&link));
        assert!(!runtime.exists(&link));
        assert!(runtime.canonicalize(&link).is_err());
    }

    #[test]
    fn test_link_over_existing_file_fails() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let occupied = dir.path().join("occupied");
        runtime.write(&occupied, b"x").unwrap();

        let err = runtime.symlink(&dir.path().join("src"), &occupied).unwrap_err();
        assert!(err.to_string().contains("occupied"));
    }
}
