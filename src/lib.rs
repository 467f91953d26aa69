pub mod alias;
pub mod commands;
pub mod dist;
pub mod linker;
pub mod path_env;
pub mod paths;
pub mod platform;
pub mod registry;
pub mod runtime;
pub mod shell;
pub mod wrapper;

/// Version string baked in at build time.
pub const VERSION: &str = env!("LNB_VERSION");

/// Fixed paths and mock defaults shared by unit tests.
#[cfg(test)]
pub mod test_utils {
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    fn host_path(unix: &str, windows: &str) -> PathBuf {
        PathBuf::from(if cfg!(windows) { windows } else { unix })
    }

    /// `/home/user`, or `C:\Users\user` on Windows.
    pub fn test_home() -> PathBuf {
        host_path("/home/user", r"C:\Users\user")
    }

    /// Registry directory under [`test_home`].
    pub fn test_config_dir() -> PathBuf {
        test_home().join(".lnb")
    }

    /// `/usr/local/bin`, or `C:\Users\user\bin` on Windows.
    pub fn test_bin_dir() -> PathBuf {
        host_path("/usr/local/bin", r"C:\Users\user\bin")
    }

    /// Home and working directory at [`test_home`], an unprivileged user,
    /// and `canonicalize` returning its input.
    pub fn configure_mock_runtime_basics(runtime: &mut MockRuntime) {
        runtime.expect_home_dir().returning(|| Some(test_home()));
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_is_privileged().returning(|| false);
        runtime
            .expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
    }
}
