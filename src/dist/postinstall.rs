//! npm post-install step: find the platform binary shipped in the package,
//! place it at `bin/lnb[.exe]`, make it executable and smoke-test it.

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::platform::Platform;
use crate::runtime::Runtime;

/// Directory inside the package that receives the binary.
pub const BIN_DIR: &str = "bin";

const EXECUTABLE_MODE: u32 = 0o755;

/// Result of running the installed binary with `--version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Trimmed standard output of the binary.
    Passed(String),
    /// Why the binary could not be run successfully.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInstallReport {
    pub platform: Platform,
    pub source: PathBuf,
    pub target: PathBuf,
    pub verification: Verification,
}

/// Translate npm platform and architecture names.
pub fn resolve_platform(os: &str, arch: &str) -> Result<Platform> {
    Platform::from_node_names(os, arch)
        .ok_or_else(|| anyhow!("Unsupported platform: {} {}", os, arch))
}

/// Where a package may carry the binary, in search order.
pub fn candidate_paths(package_dir: &Path, platform: &Platform) -> Vec<PathBuf> {
    let name = platform.binary_name();
    vec![package_dir.join(&name), package_dir.join(BIN_DIR).join(&name)]
}

/// First candidate that exists.
pub fn locate_binary<R: Runtime>(runtime: &R, candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| runtime.exists(p)).cloned()
}

/// Package root for a helper installed at `<package>/<dir>/<exe>`.
pub fn default_package_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let exe = runtime.current_exe()?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .with_context(|| format!("Cannot derive a package directory from {}", exe.display()))
}

/// Run the whole post-install sequence for `package_dir`.
///
/// Every step up to and including setting permissions is fatal on failure.
/// The final `--version` check only reports.
#[tracing::instrument(skip(runtime))]
pub fn run<R: Runtime>(
    runtime: &R,
    package_dir: &Path,
    os: &str,
    arch: &str,
) -> Result<PostInstallReport> {
    println!("Installing LNB for {} {}...", os, arch);
    let platform = resolve_platform(os, arch)?;
    debug!("Resolved platform {} ({})", platform, platform.release_tag());

    let candidates = candidate_paths(package_dir, &platform);
    let source = locate_binary(runtime, &candidates).ok_or_else(|| {
        let searched: Vec<String> = candidates
            .iter()
            .map(|p| format!("  {}", p.display()))
            .collect();
        anyhow!(
            "Could not find LNB binary for your platform\nSearched in:\n{}",
            searched.join("\n")
        )
    })?;
    println!("Found binary at: {}", source.display());

    let bin_dir = package_dir.join(BIN_DIR);
    runtime
        .create_dir_all(&bin_dir)
        .with_context(|| format!("Failed to create {}", bin_dir.display()))?;

    let target = bin_dir.join(platform.binary_name());
    if is_same_file(runtime, &source, &target) {
        debug!("Binary already at {:?}, skipping copy", target);
    } else {
        runtime
            .copy(&source, &target)
            .context("Failed to install LNB")?;
    }

    if platform.os.sets_permissions() {
        runtime
            .set_permissions(&target, EXECUTABLE_MODE)
            .context("Failed to install LNB")?;
    }
    println!("✅ LNB installed successfully to {}", target.display());
    info!("Installed {:?} from {:?}", target, source);

    let verification = verify(runtime, &target);
    match &verification {
        Verification::Passed(output) => println!("✅ Binary verification: {}", output),
        Verification::Failed(reason) => {
            debug!("Verification of {:?} failed: {}", target, reason);
            eprintln!("⚠️  Binary verification failed: {}", reason);
        }
    }

    Ok(PostInstallReport {
        platform,
        source,
        target,
        verification,
    })
}

fn is_same_file<R: Runtime>(runtime: &R, a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (runtime.canonicalize(a), runtime.canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Run `<target> --version`.
pub fn verify<R: Runtime>(runtime: &R, target: &Path) -> Verification {
    let program = target.to_string_lossy();
    match runtime.run_command(&program, &["--version".to_string()]) {
        Ok(output) if output.success => Verification::Passed(output.stdout.trim().to_string()),
        Ok(output) => Verification::Failed(format!("{} --version {}", program, output.failure_reason())),
        Err(e) => Verification::Failed(format!("{:#}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Arch, Os};
    use crate::runtime::{CommandOutput, MockRuntime};
    use mockall::predicate::eq;

    fn package_dir() -> PathBuf {
        PathBuf::from("/pkg")
    }

    #[test]
    fn test_candidates_for_every_supported_pair() {
        for os in Os::ALL {
            for arch in Arch::ALL {
                let platform = resolve_platform(os.node_name(), arch.node_name()).unwrap();
                let name = if os == Os::Windows { "lnb.exe" } else { "lnb" };
                assert_eq!(platform.binary_name(), name);
                assert_eq!(
                    candidate_paths(&package_dir(), &platform),
                    vec![package_dir().join(name), package_dir().join("bin").join(name)]
                );
            }
        }
    }

    #[test]
    fn test_unsupported_platform_names_both_values() {
        for (os, arch) in [("freebsd", "x64"), ("linux", "ia32"), ("windows", "x64")] {
            let err = resolve_platform(os, arch).unwrap_err();
            assert_eq!(err.to_string(), format!("Unsupported platform: {} {}", os, arch));
        }
    }

    #[test]
    fn test_run_unsupported_touches_nothing() {
        // No expectations: any file system access would panic
        let runtime = MockRuntime::new();
        let err = run(&runtime, &package_dir(), "sunos", "x64").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported platform: sunos x64");
    }

    #[test]
    fn test_run_not_found_lists_searched_paths() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| false);

        let err = run(&runtime, &package_dir(), "linux", "x64").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Could not find LNB binary for your platform"));
        assert!(message.contains(&package_dir().join("lnb").display().to_string()));
        assert!(message.contains(&package_dir().join("bin").join("lnb").display().to_string()));
    }

    #[test]
    fn test_run_copies_root_binary_and_sets_mode() {
        // --- Setup ---
        let mut runtime = MockRuntime::new();
        let source = package_dir().join("lnb");
        let target = package_dir().join("bin").join("lnb");

        let root_binary = source.clone();
        runtime.expect_exists().returning(move |p| p == root_binary);
        runtime
            .expect_create_dir_all()
            .with(eq(package_dir().join("bin")))
            .times(1)
            .returning(|_| Ok(()));
        runtime
            .expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
        runtime
            .expect_copy()
            .with(eq(source.clone()), eq(target.clone()))
            .times(1)
            .returning(|_, _| Ok(42));
        runtime
            .expect_set_permissions()
            .with(eq(target.clone()), eq(0o755))
            .times(1)
            .returning(|_, _| Ok(()));
        runtime.expect_run_command().returning(|_, _| {
            Ok(CommandOutput {
                success: true,
                code: Some(0),
                stdout: "LNB v1.2.3\n".to_string(),
                stderr: String::new(),
            })
        });

        // --- Execute ---
        let report = run(&runtime, &package_dir(), "darwin", "arm64").unwrap();

        // --- Verify ---
        assert_eq!(report.source, source);
        assert_eq!(report.target, target);
        assert_eq!(report.verification, Verification::Passed("LNB v1.2.3".to_string()));
    }

    #[test]
    fn test_run_bin_only_binary_is_not_copied_onto_itself() {
        let mut runtime = MockRuntime::new();
        let target = package_dir().join("bin").join("lnb");

        let bin_binary = target.clone();
        runtime.expect_exists().returning(move |p| p == bin_binary);
        runtime.expect_create_dir_all().returning(|_| Ok(()));
        runtime.expect_copy().never();
        runtime
            .expect_set_permissions()
            .times(1)
            .returning(|_, _| Ok(()));
        runtime.expect_run_command().returning(|_, _| {
            Ok(CommandOutput {
                success: true,
                code: Some(0),
                stdout: "LNB v1.2.3".to_string(),
                stderr: String::new(),
            })
        });

        let report = run(&runtime, &package_dir(), "linux", "arm64").unwrap();
        assert_eq!(report.source, target);
    }

    #[test]
    fn test_run_windows_skips_permissions() {
        let mut runtime = MockRuntime::new();
        let source = package_dir().join("lnb.exe");

        let root_binary = source.clone();
        runtime.expect_exists().returning(move |p| p == root_binary);
        runtime.expect_create_dir_all().returning(|_| Ok(()));
        runtime
            .expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
        runtime.expect_copy().times(1).returning(|_, _| Ok(1));
        runtime.expect_set_permissions().never();
        runtime.expect_run_command().returning(|_, _| {
            Ok(CommandOutput {
                success: true,
                code: Some(0),
                ..Default::default()
            })
        });

        let report = run(&runtime, &package_dir(), "win32", "x64").unwrap();
        assert_eq!(report.target, package_dir().join("bin").join("lnb.exe"));
    }

    #[test]
    fn test_copy_failure_is_fatal() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|p| p == package_dir().join("lnb"));
        runtime.expect_create_dir_all().returning(|_| Ok(()));
        runtime
            .expect_canonicalize()
            .returning(|_| Err(anyhow::anyhow!("missing")));
        runtime
            .expect_copy()
            .returning(|_, _| Err(anyhow::anyhow!("No space left on device")));

        let err = run(&runtime, &package_dir(), "linux", "x64").unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "Failed to install LNB: No space left on device"
        );
    }

    #[test]
    fn test_verification_failure_is_reported_not_raised() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|p| p == package_dir().join("lnb"));
        runtime.expect_create_dir_all().returning(|_| Ok(()));
        runtime
            .expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
        runtime.expect_copy().returning(|_, _| Ok(1));
        runtime.expect_set_permissions().returning(|_, _| Ok(()));
        runtime.expect_run_command().returning(|_, _| {
            Ok(CommandOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: "bad CPU type".to_string(),
            })
        });

        let report = run(&runtime, &package_dir(), "linux", "x64").unwrap();
        match report.verification {
            Verification::Failed(reason) => assert!(reason.contains("bad CPU type")),
            other => panic!("expected failed verification, got {:?}", other),
        }
    }

    #[test]
    fn test_default_package_dir_is_two_levels_up() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_current_exe()
            .returning(|| Ok(PathBuf::from("/pkg/scripts/lnb-dist")));

        assert_eq!(default_package_dir(&runtime).unwrap(), PathBuf::from("/pkg"));
    }
}
