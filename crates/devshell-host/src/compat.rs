//! Windows compatibility-layer (WSL) detection.
//!
//! WSL kernels identify themselves in `/proc/version`, e.g.
//! `Linux version 5.15.153.1-microsoft-standard-WSL2`. Detection is
//! best-effort: anything that prevents reading the file counts as "not
//! WSL", never as an error.

use std::path::Path;

use serde::Serialize;

use crate::platform::{HostOs, HostPlatform};

/// Kernel version metadata exposed by Linux.
pub const KERNEL_VERSION_PATH: &str = "/proc/version";

/// Lowercase markers a WSL kernel string contains.
const WSL_MARKERS: [&str; 2] = ["microsoft", "wsl"];

/// Whether the host kernel is a Windows-hosted compatibility layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompatLayer {
    Native,
    Wsl,
}

impl CompatLayer {
    pub fn is_wsl(self) -> bool {
        matches!(self, CompatLayer::Wsl)
    }

    fn from_detected(detected: bool) -> Self {
        if detected {
            CompatLayer::Wsl
        } else {
            CompatLayer::Native
        }
    }
}

/// Case-insensitive marker test on kernel version text.
pub fn kernel_reports_compat_layer(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    WSL_MARKERS.iter().any(|m| lower.contains(m))
}

/// Read `path` and test it for WSL markers. Read failures yield `false`.
pub fn detect_compat_layer_at(path: &Path) -> bool {
    match std::fs::read_to_string(path) {
        Ok(text) => kernel_reports_compat_layer(&text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "kernel version unreadable");
            false
        }
    }
}

/// Detect WSL for `host`. Only Linux hosts consult the kernel metadata.
pub fn detect_compat_layer(host: &HostPlatform) -> CompatLayer {
    detect_compat_layer_with(host, Path::new(KERNEL_VERSION_PATH))
}

/// Like [`detect_compat_layer`] but reading an arbitrary metadata file.
pub fn detect_compat_layer_with(host: &HostPlatform, kernel_version: &Path) -> CompatLayer {
    if host.os != HostOs::Linux {
        return CompatLayer::Native;
    }
    CompatLayer::from_detected(detect_compat_layer_at(kernel_version))
}
