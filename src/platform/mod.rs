//! Platform identifiers and the naming tables that translate between them.
//!
//! Three naming conventions meet here:
//! - the host as seen by Node/npm (`darwin`, `linux`, `win32`; `x64`, `arm64`)
//! - the release pipeline (`darwin`, `linux`, `windows`; `amd64`, `arm64`)
//! - the compile-time target of this binary
//!
//! Each table is an exhaustive `match`, so an unmapped identifier is always an
//! explicit `None` rather than a silent lookup miss.

use std::fmt;

/// Operating systems `lnb` is released for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Darwin,
    Linux,
    Windows,
}

/// CPU architectures `lnb` is released for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Os {
    pub const ALL: [Os; 3] = [Os::Darwin, Os::Linux, Os::Windows];

    /// Translate an npm `process.platform` value.
    pub fn from_node_name(name: &str) -> Option<Self> {
        match name {
            "darwin" => Some(Os::Darwin),
            "linux" => Some(Os::Linux),
            "win32" => Some(Os::Windows),
            _ => None,
        }
    }

    pub fn node_name(self) -> &'static str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
            Os::Windows => "win32",
        }
    }

    pub fn release_name(self) -> &'static str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
            Os::Windows => "windows",
        }
    }

    /// The OS this binary was compiled for, if `lnb` supports it.
    pub fn current() -> Option<Self> {
        #[cfg(target_os = "macos")]
        {
            Some(Os::Darwin)
        }
        #[cfg(target_os = "linux")]
        {
            Some(Os::Linux)
        }
        #[cfg(target_os = "windows")]
        {
            Some(Os::Windows)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Suffix appended to executable file names.
    pub fn exe_suffix(self) -> &'static str {
        match self {
            Os::Windows => ".exe",
            Os::Darwin | Os::Linux => "",
        }
    }

    /// Whether Unix permission bits are meaningful on this OS.
    pub fn sets_permissions(self) -> bool {
        !matches!(self, Os::Windows)
    }

    /// Separator between entries of the `PATH` environment variable.
    pub fn path_separator(self) -> char {
        match self {
            Os::Windows => ';',
            Os::Darwin | Os::Linux => ':',
        }
    }

    pub fn is_windows(self) -> bool {
        matches!(self, Os::Windows)
    }
}

impl Arch {
    pub const ALL: [Arch; 2] = [Arch::Amd64, Arch::Arm64];

    /// Translate an npm `process.arch` value.
    pub fn from_node_name(name: &str) -> Option<Self> {
        match name {
            "x64" => Some(Arch::Amd64),
            "arm64" => Some(Arch::Arm64),
            _ => None,
        }
    }

    pub fn node_name(self) -> &'static str {
        match self {
            Arch::Amd64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }

    pub fn release_name(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }

    /// The architecture this binary was compiled for, if `lnb` supports it.
    pub fn current() -> Option<Self> {
        #[cfg(target_arch = "x86_64")]
        {
            Some(Arch::Amd64)
        }
        #[cfg(target_arch = "aarch64")]
        {
            Some(Arch::Arm64)
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            None
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.release_name())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.release_name())
    }
}

/// A supported (OS, architecture) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Translate npm platform/arch names; `None` if either is unmapped.
    pub fn from_node_names(os: &str, arch: &str) -> Option<Self> {
        Some(Self::new(Os::from_node_name(os)?, Arch::from_node_name(arch)?))
    }

    /// Release artifact tag, e.g. `darwin-arm64`.
    pub fn release_tag(&self) -> String {
        format!("{}-{}", self.os.release_name(), self.arch.release_name())
    }

    /// File name of the `lnb` executable for this platform.
    pub fn binary_name(&self) -> String {
        format!("lnb{}", self.os.exe_suffix())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.os, self.arch)
    }
}

/// Host OS/arch names in the npm convention, for the compiled target.
///
/// Unsupported targets fall back to Rust's own names so callers can report them.
pub fn host_node_names() -> (String, String) {
    let os = Os::current()
        .map(|os| os.node_name().to_string())
        .unwrap_or_else(|| std::env::consts::OS.to_string());
    let arch = Arch::current()
        .map(|arch| arch.node_name().to_string())
        .unwrap_or_else(|| std::env::consts::ARCH.to_string());
    (os, arch)
}
