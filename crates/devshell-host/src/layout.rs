//! Where the prebuilt CLI binary lives under an install root.
//!
//! Layout: `<root>/resources/bin/<os>-<arch>/<codex|codex.exe>`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{HostError, Result};
use crate::platform::HostPlatform;

/// Directory, relative to the install root, holding per-platform binaries.
pub const BIN_ROOT: &str = "resources/bin";

/// A resolved (not necessarily existing) CLI binary location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliBinary {
    /// Platform directory name, e.g. `linux-x64`.
    pub dir_name: &'static str,
    /// Executable file name, e.g. `codex.exe`.
    pub file_name: &'static str,
    /// Absolute (root-joined) path.
    pub path: PathBuf,
}

impl CliBinary {
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Fail with [`HostError::MissingBinary`] unless the file is present.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(HostError::MissingBinary {
                path: self.path.clone(),
            })
        }
    }
}

/// Compute the binary location for `host` under `root` without touching
/// the filesystem.
pub fn resolve_cli_binary(root: &Path, host: &HostPlatform) -> Result<CliBinary> {
    let dir_name = host.bin_dir()?;
    let file_name = host.os.cli_file_name();
    let path = root.join(BIN_ROOT).join(dir_name).join(file_name);
    Ok(CliBinary {
        dir_name,
        file_name,
        path,
    })
}

/// Resolve and check existence in one step.
pub fn locate_cli_binary(root: &Path, host: &HostPlatform) -> Result<CliBinary> {
    let binary = resolve_cli_binary(root, host)?;
    binary.ensure_exists()?;
    tracing::debug!(path = %binary.path.display(), "CLI binary present");
    Ok(binary)
}
