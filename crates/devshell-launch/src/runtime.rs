//! Locating the desktop-shell (Electron) runtime executable.
//!
//! Mirrors how the `electron` npm package finds its binary: the package's
//! `path.txt` names the executable relative to its `dist/` directory, and
//! `ELECTRON_OVERRIDE_DIST_PATH` swaps in a different `dist/`.

use std::path::{Path, PathBuf};

use devshell_host::HostOs;
use serde::Serialize;

use crate::env::{EnvSnapshot, ELECTRON_OVERRIDE_DIST_PATH};
use crate::error::{LaunchError, Result};

/// Electron package directory relative to the install root.
pub const ELECTRON_PACKAGE_DIR: &str = "node_modules/electron";

/// Where the runtime path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeSource {
    /// `--runtime` flag or `runtime.path` in `devshell.toml`.
    Explicit,
    /// `ELECTRON_OVERRIDE_DIST_PATH`.
    OverrideDist,
    /// `node_modules/electron/path.txt`.
    NpmPackage,
}

/// A located runtime executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellRuntime {
    pub path: PathBuf,
    pub source: RuntimeSource,
}

/// Executable name inside `dist/` when `path.txt` is unavailable.
pub fn default_executable(os: &HostOs) -> &'static str {
    match os {
        HostOs::Darwin => "Electron.app/Contents/MacOS/Electron",
        HostOs::Win32 => "electron.exe",
        _ => "electron",
    }
}

fn read_path_txt(root: &Path) -> Option<String> {
    let text = std::fs::read_to_string(root.join(ELECTRON_PACKAGE_DIR).join("path.txt")).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Resolve the runtime executable for an install rooted at `root`.
///
/// Precedence: `explicit` (relative paths are joined onto `root`), then
/// `ELECTRON_OVERRIDE_DIST_PATH`, then the npm package's `path.txt`.
pub fn resolve_runtime(
    root: &Path,
    os: &HostOs,
    explicit: Option<&Path>,
    env: &EnvSnapshot,
) -> Result<ShellRuntime> {
    let candidate = if let Some(path) = explicit {
        ShellRuntime {
            path: root.join(path),
            source: RuntimeSource::Explicit,
        }
    } else if let Some(dist) = env.get_os(ELECTRON_OVERRIDE_DIST_PATH) {
        let exe = read_path_txt(root).unwrap_or_else(|| default_executable(os).to_string());
        ShellRuntime {
            path: Path::new(dist).join(exe),
            source: RuntimeSource::OverrideDist,
        }
    } else {
        let exe = read_path_txt(root).ok_or_else(|| LaunchError::RuntimeNotFound {
            detail: format!(
                "{} is missing; run your package manager's install, or pass --runtime",
                root.join(ELECTRON_PACKAGE_DIR).join("path.txt").display()
            ),
        })?;
        ShellRuntime {
            path: root.join(ELECTRON_PACKAGE_DIR).join("dist").join(exe),
            source: RuntimeSource::NpmPackage,
        }
    };

    if !candidate.path.is_file() {
        return Err(LaunchError::RuntimeNotFound {
            detail: format!("no executable at {}", candidate.path.display()),
        });
    }
    Ok(candidate)
}
