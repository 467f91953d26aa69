//! Runtime abstraction for system operations.
//!
//! Every side effect `lnb` performs goes through the [`Runtime`] trait so the
//! linking logic can be exercised against a `MockRuntime` in tests.
//!
//! # Structure
//!
//! - `path` - Lexical path helpers (normalize, absolutize)
//! - `env` - Environment variables, directories, privilege detection
//! - `fs` - File contents, copies, permission bits
//! - `symlink` - Creating links and resolving paths
//! - `process` - Running child processes and PATH lookups
//! - `user` - Interactive prompts

mod env;
mod fs;
pub mod path;
mod process;
mod symlink;
mod user;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

pub use path::{absolutize, normalize_path};
pub use process::CommandOutput;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn home_dir(&self) -> Option<PathBuf>;
    fn current_dir(&self) -> Result<PathBuf>;
    fn current_exe(&self) -> Result<PathBuf>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn copy(&self, from: &Path, to: &Path) -> Result<u64>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;

    /// Whether any execute bit is set. On Windows, whether it is a regular file.
    fn is_executable(&self, path: &Path) -> Result<bool>;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Links
    fn symlink(&self, original: &Path, link: &Path) -> Result<()>;
    /// Whether `path` is a symlink, dangling or not.
    fn is_symlink(&self, path: &Path) -> bool;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    // Processes
    /// Run a program to completion, capturing stdout and stderr.
    fn run_command(&self, program: &str, args: &[String]) -> Result<CommandOutput>;

    /// Locate an executable by name on `PATH`.
    fn which(&self, name: &str) -> Option<PathBuf>;

    // Privilege
    fn is_privileged(&self) -> bool;

    // User interaction
    /// Print `prompt` and read one line from stdin, trimmed.
    fn prompt_line(&self, prompt: &str) -> Result<String>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn current_exe(&self) -> Result<PathBuf> {
        self.current_exe_impl()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_impl(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<u64> {
        self.copy_impl(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.is_file_impl(path)
    }

    fn is_executable(&self, path: &Path) -> Result<bool> {
        self.is_executable_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    fn symlink(&self, original: &Path, link: &Path) -> Result<()> {
        self.symlink_impl(original, link)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.is_symlink_impl(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        self.canonicalize_impl(path)
    }

    fn run_command(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        self.run_command_impl(program, args)
    }

    fn which(&self, name: &str) -> Option<PathBuf> {
        self.which_impl(name)
    }

    fn is_privileged(&self) -> bool {
        self.is_privileged_impl()
    }

    fn prompt_line(&self, prompt: &str) -> Result<String> {
        self.prompt_line_impl(prompt)
    }
}
