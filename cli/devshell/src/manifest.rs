//! `devshell.toml` project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use devshell_launch::LaunchDefaults;
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "devshell.toml";

/// The top-level manifest. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DevshellManifest {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[runtime]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Runtime executable; relative paths resolve against the install root.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Extra arguments appended after the application root.
    #[serde(default)]
    pub args: Vec<String>,
}

/// `[defaults]` section: values used when the environment leaves them unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultsConfig {
    #[serde(default)]
    pub build_flavor: Option<String>,
    #[serde(default)]
    pub renderer_url: Option<String>,
}

impl DevshellManifest {
    /// Search upward from `start_dir` for `devshell.toml`, returning it with
    /// the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: DevshellManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing devshell.toml")
    }

    /// Launch defaults, with `flavor` (from the command line) taking
    /// precedence over the manifest.
    pub fn launch_defaults(&self, flavor: Option<&str>) -> LaunchDefaults {
        let mut defaults = LaunchDefaults::default();
        if let Some(f) = flavor.or(self.defaults.build_flavor.as_deref()) {
            defaults.build_flavor = f.to_string();
        }
        if let Some(url) = &self.defaults.renderer_url {
            defaults.renderer_url = url.clone();
        }
        defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let manifest = DevshellManifest::from_str(
            r#"
[runtime]
path = "node_modules/electron/dist/electron"
args = ["--inspect=9229"]

[defaults]
build-flavor = "nightly"
renderer-url = "app://-/alt.html"
"#,
        )
        .unwrap();
        assert_eq!(
            manifest.runtime.path.as_deref(),
            Some(Path::new("node_modules/electron/dist/electron"))
        );
        assert_eq!(manifest.runtime.args, vec!["--inspect=9229"]);
        let defaults = manifest.launch_defaults(None);
        assert_eq!(defaults.build_flavor, "nightly");
        assert_eq!(defaults.renderer_url, "app://-/alt.html");
    }

    #[test]
    fn empty_manifest_uses_builtin_defaults() {
        let manifest = DevshellManifest::from_str("").unwrap();
        assert!(manifest.runtime.path.is_none());
        assert_eq!(manifest.launch_defaults(None), LaunchDefaults::default());
    }

    #[test]
    fn flag_beats_manifest_flavor() {
        let manifest = DevshellManifest::from_str("[defaults]\nbuild-flavor = \"nightly\"\n").unwrap();
        assert_eq!(manifest.launch_defaults(Some("prod")).build_flavor, "prod");
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(DevshellManifest::from_str("[runtime\npath = 1").is_err());
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[defaults]\nbuild-flavor = \"parent\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found) = DevshellManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.defaults.build_flavor.as_deref(), Some("parent"));
        assert_eq!(found, dir.path());
    }

    #[test]
    fn find_and_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "not = [valid").unwrap();
        let err = DevshellManifest::find_and_load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}
