//! Host platform identity and the prebuilt-binary support table.
//!
//! Identifiers follow the naming used by the binary distribution
//! (`darwin`, `linux`, `win32` / `x64`, `arm64`), not Rust's
//! `std::env::consts` names, so they can be joined straight into
//! directory names like `darwin-arm64`.

use std::fmt;

use serde::Serialize;

use crate::error::{HostError, Result};

/// Operating system identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum HostOs {
    Darwin,
    Linux,
    Win32,
    /// Anything else, kept verbatim for diagnostics.
    Other(String),
}

/// CPU architecture identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum HostArch {
    X64,
    Arm64,
    Ia32,
    Arm,
    /// Anything else, kept verbatim for diagnostics.
    Other(String),
}

impl HostOs {
    /// Map a `std::env::consts::OS` value (or an already-normalized
    /// identifier) onto the distribution naming.
    pub fn from_rust_os(os: &str) -> Self {
        match os {
            "macos" | "darwin" => HostOs::Darwin,
            "linux" => HostOs::Linux,
            "windows" | "win32" => HostOs::Win32,
            other => HostOs::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HostOs::Darwin => "darwin",
            HostOs::Linux => "linux",
            HostOs::Win32 => "win32",
            HostOs::Other(s) => s,
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, HostOs::Win32)
    }

    /// File name of the CLI binary on this platform.
    pub fn cli_file_name(&self) -> &'static str {
        if self.is_windows() {
            "codex.exe"
        } else {
            "codex"
        }
    }
}

impl HostArch {
    /// Map a `std::env::consts::ARCH` value (or an already-normalized
    /// identifier) onto the distribution naming.
    pub fn from_rust_arch(arch: &str) -> Self {
        match arch {
            "x86_64" | "x64" => HostArch::X64,
            "aarch64" | "arm64" => HostArch::Arm64,
            "x86" | "ia32" => HostArch::Ia32,
            "arm" => HostArch::Arm,
            other => HostArch::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HostArch::X64 => "x64",
            HostArch::Arm64 => "arm64",
            HostArch::Ia32 => "ia32",
            HostArch::Arm => "arm",
            HostArch::Other(s) => s,
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HostOs> for String {
    fn from(os: HostOs) -> Self {
        os.as_str().to_string()
    }
}

impl From<HostArch> for String {
    fn from(arch: HostArch) -> Self {
        arch.as_str().to_string()
    }
}

/// One row of the support table.
#[derive(Debug)]
pub struct TargetEntry {
    pub os: HostOs,
    pub arch: HostArch,
    /// Directory under `resources/bin/` holding the binary.
    pub dir: &'static str,
}

/// Every host a prebuilt CLI binary ships for. New targets are added here.
static SUPPORTED_TARGETS: [TargetEntry; 5] = [
    TargetEntry { os: HostOs::Darwin, arch: HostArch::X64, dir: "darwin-x64" },
    TargetEntry { os: HostOs::Darwin, arch: HostArch::Arm64, dir: "darwin-arm64" },
    TargetEntry { os: HostOs::Linux, arch: HostArch::X64, dir: "linux-x64" },
    TargetEntry { os: HostOs::Linux, arch: HostArch::Arm64, dir: "linux-arm64" },
    TargetEntry { os: HostOs::Win32, arch: HostArch::X64, dir: "win32-x64" },
];

/// List the support table.
pub fn supported_targets() -> &'static [TargetEntry] {
    &SUPPORTED_TARGETS
}

/// An (OS, architecture) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPlatform {
    pub os: HostOs,
    pub arch: HostArch,
}

impl HostPlatform {
    pub fn new(os: HostOs, arch: HostArch) -> Self {
        Self { os, arch }
    }

    /// The platform this process is running on.
    pub fn current() -> Self {
        Self::new(
            HostOs::from_rust_os(std::env::consts::OS),
            HostArch::from_rust_arch(std::env::consts::ARCH),
        )
    }

    /// Look the pair up in the support table.
    pub fn bin_dir(&self) -> Result<&'static str> {
        SUPPORTED_TARGETS
            .iter()
            .find(|t| t.os == self.os && t.arch == self.arch)
            .map(|t| t.dir)
            .ok_or_else(|| HostError::UnsupportedPlatform {
                os: self.os.to_string(),
                arch: self.arch.to_string(),
            })
    }

    pub fn is_supported(&self) -> bool {
        self.bin_dir().is_ok()
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
