//! The launch pipeline.

use std::path::PathBuf;

use devshell_host::compat::{detect_compat_layer_with, KERNEL_VERSION_PATH};
use devshell_host::{locate_cli_binary, CliBinary, CompatLayer, HostPlatform};
use serde::Serialize;

use crate::config::{LaunchConfig, LaunchDefaults};
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::runtime::{resolve_runtime, ShellRuntime};
use crate::spawn::Spawner;

/// Caller-controlled launch inputs.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Install root holding `resources/bin/` and `node_modules/`.
    pub root: PathBuf,
    /// Explicit runtime executable, bypassing npm resolution.
    pub runtime: Option<PathBuf>,
    /// Arguments appended after the application root.
    pub extra_args: Vec<String>,
    pub defaults: LaunchDefaults,
    /// Kernel metadata consulted for WSL detection.
    pub kernel_version: PathBuf,
}

impl LaunchOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            runtime: None,
            extra_args: Vec::new(),
            defaults: LaunchDefaults::default(),
            kernel_version: PathBuf::from(KERNEL_VERSION_PATH),
        }
    }
}

/// Everything resolved for one launch.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchPlan {
    pub host: HostPlatform,
    pub binary: CliBinary,
    pub compat: CompatLayer,
    pub runtime: ShellRuntime,
    pub config: LaunchConfig,
}

/// Resolves a [`LaunchPlan`] and hands it to a [`Spawner`].
#[derive(Debug, Clone)]
pub struct Launcher {
    host: HostPlatform,
    env: EnvSnapshot,
    options: LaunchOptions,
}

impl Launcher {
    pub fn new(host: HostPlatform, env: EnvSnapshot, options: LaunchOptions) -> Self {
        Self { host, env, options }
    }

    /// Launcher for the current host and process environment.
    pub fn from_environment(options: LaunchOptions) -> Self {
        Self::new(HostPlatform::current(), EnvSnapshot::capture(), options)
    }

    pub fn host(&self) -> &HostPlatform {
        &self.host
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// Run every resolution step. Fails on an unsupported host, a missing
    /// CLI binary or an unlocatable runtime; never touches a process.
    pub fn prepare(&self) -> Result<LaunchPlan> {
        let root = &self.options.root;
        let binary = locate_cli_binary(root, &self.host)?;
        let compat = detect_compat_layer_with(&self.host, &self.options.kernel_version);
        let runtime = resolve_runtime(
            root,
            &self.host.os,
            self.options.runtime.as_deref(),
            &self.env,
        )?;

        let config = LaunchConfig::builder(runtime.path.clone(), root.clone(), binary.path.clone())
            .compat(compat)
            .defaults(self.options.defaults.clone())
            .extra_args(self.options.extra_args.iter().cloned())
            .build(&self.env);

        Ok(LaunchPlan {
            host: self.host.clone(),
            binary,
            compat,
            runtime,
            config,
        })
    }

    /// Prepare, then spawn. Returns the child's exit code.
    pub fn run(&self, spawner: &mut dyn Spawner) -> Result<i32> {
        let plan = self.prepare()?;
        plan.log();
        spawner.spawn(&plan.config)
    }
}

impl LaunchPlan {
    /// Informational summary of what is about to run.
    pub fn log(&self) {
        tracing::info!("platform: {}, arch: {}", self.host.os, self.host.arch);
        tracing::info!("CLI path: {}", self.binary.path.display());
        if self.compat.is_wsl() {
            tracing::info!("WSL detected, forcing software rendering + Wayland CSD");
        }
        tracing::debug!(runtime = %self.runtime.path.display(), source = ?self.runtime.source, "runtime resolved");
        tracing::debug!(command = %self.config.display_command(), "launch command");
    }
}
