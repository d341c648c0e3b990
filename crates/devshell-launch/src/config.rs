//! Desktop-shell launch configuration.
//!
//! A [`LaunchConfig`] is the complete, immutable description of the child
//! process: program, arguments, working directory and the environment
//! overrides layered on top of the inherited environment.
//!
//! Under WSL the accelerated compositor crashes in a loop on the D3D12
//! (dzn) driver. The workaround disables GPU compositing and forces Mesa
//! software GL, but never passes `--disable-gpu`: the shell performs its
//! own GPU availability check and must still see a GPU.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use devshell_host::CompatLayer;
use serde::Serialize;

use crate::env::{
    EnvSnapshot, BUILD_FLAVOR, CODEX_CLI_PATH, ELECTRON_RENDERER_URL, LIBGL_ALWAYS_SOFTWARE,
};

/// The application-root argument; resolved against the child's cwd.
pub const APP_ROOT_ARG: &str = ".";

/// Runtime flags prepended on WSL hosts, in order.
pub const WSL_RUNTIME_ARGS: [&str; 4] = [
    "--disable-gpu-compositing",
    "--in-process-gpu",
    "--ozone-platform=wayland",
    "--enable-features=UseOzonePlatform,WaylandWindowDecorations",
];

pub const DEFAULT_BUILD_FLAVOR: &str = "dev";
pub const DEFAULT_RENDERER_URL: &str = "app://-/index.html";

/// Fallback values for variables the caller may leave unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LaunchDefaults {
    pub build_flavor: String,
    pub renderer_url: String,
}

impl Default for LaunchDefaults {
    fn default() -> Self {
        Self {
            build_flavor: DEFAULT_BUILD_FLAVOR.to_string(),
            renderer_url: DEFAULT_RENDERER_URL.to_string(),
        }
    }
}

/// A fully computed child-process invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchConfig {
    /// Desktop-shell runtime executable.
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Child working directory (the application root).
    pub cwd: PathBuf,
    /// Overrides applied over the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl LaunchConfig {
    pub fn builder(
        program: impl Into<PathBuf>,
        app_root: impl Into<PathBuf>,
        cli_path: impl Into<PathBuf>,
    ) -> LaunchConfigBuilder {
        LaunchConfigBuilder {
            program: program.into(),
            app_root: app_root.into(),
            cli_path: cli_path.into(),
            compat: CompatLayer::Native,
            defaults: LaunchDefaults::default(),
            extra_args: Vec::new(),
        }
    }

    /// Whether the software-rendering workaround is part of this config.
    pub fn forces_software_rendering(&self) -> bool {
        self.env.contains_key(LIBGL_ALWAYS_SOFTWARE)
    }

    /// `std::process::Command` for this config: inherited environment plus
    /// overrides, all three standard streams connected to the parent's.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.cwd)
            .envs(&self.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    /// Shell-like rendering for logs and dry runs.
    pub fn display_command(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.env {
            out.push_str(&format!("{key}={} ", quote(value)));
        }
        out.push_str(&quote(&self.program.to_string_lossy()));
        for arg in &self.args {
            out.push(' ');
            out.push_str(&quote(arg));
        }
        out
    }
}

fn quote(s: &str) -> String {
    if !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@%+".contains(c))
    {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Builder for [`LaunchConfig`].
#[derive(Debug, Clone)]
pub struct LaunchConfigBuilder {
    program: PathBuf,
    app_root: PathBuf,
    cli_path: PathBuf,
    compat: CompatLayer,
    defaults: LaunchDefaults,
    extra_args: Vec<String>,
}

impl LaunchConfigBuilder {
    pub fn compat(mut self, compat: CompatLayer) -> Self {
        self.compat = compat;
        self
    }

    pub fn defaults(mut self, defaults: LaunchDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Extra runtime arguments, appended after the application root.
    pub fn extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Produce the config. Defaults are only written for variables the
    /// caller left unset in `inherited`.
    pub fn build(self, inherited: &EnvSnapshot) -> LaunchConfig {
        let mut args: Vec<String> = Vec::new();
        let mut env = BTreeMap::new();

        if self.compat.is_wsl() {
            args.extend(WSL_RUNTIME_ARGS.iter().map(|a| a.to_string()));
            env.insert(LIBGL_ALWAYS_SOFTWARE.to_string(), "1".to_string());
        }
        args.push(APP_ROOT_ARG.to_string());
        args.extend(self.extra_args);

        env.insert(
            CODEX_CLI_PATH.to_string(),
            path_value(&self.cli_path),
        );
        // Caller-set values reach the child through inheritance untouched,
        // including non-unicode ones.
        if !inherited.is_set(BUILD_FLAVOR) {
            env.insert(BUILD_FLAVOR.to_string(), self.defaults.build_flavor);
        }
        if !inherited.is_set(ELECTRON_RENDERER_URL) {
            env.insert(ELECTRON_RENDERER_URL.to_string(), self.defaults.renderer_url);
        }

        LaunchConfig {
            program: self.program,
            args,
            cwd: self.app_root,
            env,
        }
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> LaunchConfigBuilder {
        LaunchConfig::builder(
            "/app/node_modules/electron/dist/electron",
            "/app",
            "/app/resources/bin/linux-x64/codex",
        )
    }

    #[test]
    fn native_config_has_only_base_argument() {
        let config = builder().build(&EnvSnapshot::default());
        assert_eq!(config.args, vec!["."]);
        assert!(!config.forces_software_rendering());
        assert_eq!(config.cwd, PathBuf::from("/app"));
    }

    #[test]
    fn wsl_prepends_workaround_flags() {
        let config = builder().compat(CompatLayer::Wsl).build(&EnvSnapshot::default());
        assert_eq!(
            config.args,
            vec![
                "--disable-gpu-compositing",
                "--in-process-gpu",
                "--ozone-platform=wayland",
                "--enable-features=UseOzonePlatform,WaylandWindowDecorations",
                ".",
            ]
        );
        assert_eq!(config.env.get(LIBGL_ALWAYS_SOFTWARE).map(String::as_str), Some("1"));
        assert!(!config.args.iter().any(|a| a == "--disable-gpu"));
    }

    #[test]
    fn always_sets_cli_path_and_defaults() {
        let config = builder().build(&EnvSnapshot::default());
        assert_eq!(
            config.env.get(CODEX_CLI_PATH).map(String::as_str),
            Some("/app/resources/bin/linux-x64/codex")
        );
        assert_eq!(config.env.get(BUILD_FLAVOR).map(String::as_str), Some("dev"));
        assert_eq!(
            config.env.get(ELECTRON_RENDERER_URL).map(String::as_str),
            Some("app://-/index.html")
        );
        assert_eq!(config.env.len(), 3);
    }

    #[test]
    fn inherited_values_are_left_to_the_child() {
        let inherited = EnvSnapshot::from_pairs([
            (BUILD_FLAVOR, "prod"),
            (ELECTRON_RENDERER_URL, "http://localhost:5173"),
        ]);
        let config = builder().build(&inherited);
        assert!(!config.env.contains_key(BUILD_FLAVOR));
        assert!(!config.env.contains_key(ELECTRON_RENDERER_URL));
        assert!(config.env.contains_key(CODEX_CLI_PATH));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_inherited_flavor_is_not_overwritten() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"nightly-\xff".to_vec());
        let inherited = EnvSnapshot::from_lookup(|k| (k == BUILD_FLAVOR).then(|| raw.clone()));
        let config = builder().build(&inherited);
        assert!(!config.env.contains_key(BUILD_FLAVOR));

        let cmd = config.command();
        assert!(!cmd.get_envs().any(|(k, _)| k == BUILD_FLAVOR));
        // The renderer URL was unset, so its default is still applied.
        assert_eq!(
            config.env.get(ELECTRON_RENDERER_URL).map(String::as_str),
            Some(DEFAULT_RENDERER_URL)
        );
    }

    #[test]
    fn configured_defaults_apply_when_unset() {
        let defaults = LaunchDefaults {
            build_flavor: "nightly".into(),
            renderer_url: "app://-/alt.html".into(),
        };
        let config = builder().defaults(defaults).build(&EnvSnapshot::default());
        assert_eq!(config.env.get(BUILD_FLAVOR).map(String::as_str), Some("nightly"));
        assert_eq!(
            config.env.get(ELECTRON_RENDERER_URL).map(String::as_str),
            Some("app://-/alt.html")
        );
    }

    #[test]
    fn extra_args_follow_app_root() {
        let config = builder()
            .compat(CompatLayer::Wsl)
            .extra_args(["--inspect=9229"])
            .build(&EnvSnapshot::default());
        let root = config.args.iter().position(|a| a == ".").unwrap();
        assert_eq!(root, WSL_RUNTIME_ARGS.len());
        assert_eq!(config.args.last().map(String::as_str), Some("--inspect=9229"));
    }

    #[test]
    fn command_carries_args_env_and_cwd() {
        let config = builder().compat(CompatLayer::Wsl).build(&EnvSnapshot::default());
        let cmd = config.command();
        assert_eq!(cmd.get_program(), config.program.as_os_str());
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, config.args);
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/app")));
        let envs: Vec<_> = cmd
            .get_envs()
            .map(|(k, _)| k.to_string_lossy().into_owned())
            .collect();
        assert!(envs.contains(&LIBGL_ALWAYS_SOFTWARE.to_string()));
        assert!(envs.contains(&CODEX_CLI_PATH.to_string()));
    }

    #[test]
    fn display_command_quotes_when_needed() {
        let config = LaunchConfig {
            program: PathBuf::from("/opt/My App/electron"),
            args: vec![".".into()],
            cwd: PathBuf::from("/opt"),
            env: BTreeMap::from([("BUILD_FLAVOR".to_string(), "dev".to_string())]),
        };
        assert_eq!(
            config.display_command(),
            "BUILD_FLAVOR=dev '/opt/My App/electron' ."
        );
    }
}
