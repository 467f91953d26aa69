//! Lexical path helpers. Nothing here touches the file system.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without following symlinks.
///
/// A `..` that would climb above the start of the path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut acc, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir if acc.pop() => {}
                other => acc.push(other),
            }
            acc
        })
}

/// Resolve `path` against `base` when it is relative, then normalize it.
///
/// With base `/home/user/project`, `./bin/tool` becomes
/// `/home/user/project/bin/tool` and `../other` becomes `/home/user/other`.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_cur_dir_and_resolves_parent() {
        assert_eq!(
            normalize_path(Path::new("/opt/./tools/../bin/./lnb")),
            PathBuf::from("/opt/bin/lnb")
        );
        assert_eq!(
            normalize_path(Path::new("scripts/build/../run.sh")),
            PathBuf::from("scripts/run.sh")
        );
    }

    #[test]
    fn test_normalize_keeps_leading_parent() {
        assert_eq!(normalize_path(Path::new("../tool")), PathBuf::from("../tool"));
        assert_eq!(normalize_path(Path::new("./.")), PathBuf::new());
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize_path(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolutize_relative_forms() {
        let base = Path::new("/home/user/project");
        assert_eq!(
            absolutize(base, Path::new("./bin/tool")),
            PathBuf::from("/home/user/project/bin/tool")
        );
        assert_eq!(
            absolutize(base, Path::new("../other/app.jar")),
            PathBuf::from("/home/user/other/app.jar")
        );
        assert_eq!(
            absolutize(base, Path::new("server.js")),
            PathBuf::from("/home/user/project/server.js")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_absolutize_absolute_is_only_normalized() {
        assert_eq!(
            absolutize(Path::new("/home/user"), Path::new("/opt/tools/./run")),
            PathBuf::from("/opt/tools/run")
        );
    }

    #[cfg(windows)]
    #[test]
    fn test_absolutize_windows() {
        assert_eq!(
            absolutize(Path::new(r"C:\Users\user"), Path::new(r".\tools\app.exe")),
            PathBuf::from(r"C:\Users\user\tools\app.exe")
        );
    }
}
