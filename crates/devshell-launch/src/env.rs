//! Read-only view of the inherited environment.
//!
//! The launcher never calls `std::env::set_var`. It captures the handful of
//! variables it consults up front and merges its overrides into the child's
//! environment at the spawn boundary.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// Absolute path of the CLI binary, read by the desktop shell.
pub const CODEX_CLI_PATH: &str = "CODEX_CLI_PATH";
/// Build flavor tag.
pub const BUILD_FLAVOR: &str = "BUILD_FLAVOR";
/// Static resource URL the renderer loads.
pub const ELECTRON_RENDERER_URL: &str = "ELECTRON_RENDERER_URL";
/// Alternate Electron `dist` directory.
pub const ELECTRON_OVERRIDE_DIST_PATH: &str = "ELECTRON_OVERRIDE_DIST_PATH";
/// Mesa switch forcing llvmpipe software rendering.
pub const LIBGL_ALWAYS_SOFTWARE: &str = "LIBGL_ALWAYS_SOFTWARE";

/// Variables captured by [`EnvSnapshot::capture`].
const CONSULTED: [&str; 3] = [BUILD_FLAVOR, ELECTRON_RENDERER_URL, ELECTRON_OVERRIDE_DIST_PATH];

/// Snapshot of the environment variables the launcher reads. Values are
/// kept as raw `OsString`s so non-unicode settings survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, OsString>,
}

impl EnvSnapshot {
    /// Capture the consulted variables from the current process.
    pub fn capture() -> Self {
        Self::from_lookup(|k| std::env::var_os(k))
    }

    /// Capture the consulted variables through `lookup`.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        Self::from_pairs(
            CONSULTED
                .iter()
                .filter_map(|&k| lookup(k).map(|v| (k.to_string(), v))),
        )
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable. Empty values count as unset.
    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.vars
            .get(key)
            .map(OsString::as_os_str)
            .filter(|v| !v.is_empty())
    }

    /// Whether the caller set `key` to a non-empty value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get_os(key).is_some()
    }
}
