//! Launch pipeline for the devshell desktop-shell runtime.
//!
//! Resolution runs strictly before spawning:
//! host → CLI binary → existence check → WSL detection → runtime → config.
//! Only a fully prepared [`LaunchPlan`] ever reaches a [`Spawner`].

pub mod config;
pub mod env;
pub mod error;
pub mod launcher;
pub mod runtime;
pub mod spawn;

pub use config::{LaunchConfig, LaunchDefaults};
pub use env::EnvSnapshot;
pub use error::{LaunchError, Result};
pub use launcher::{LaunchOptions, LaunchPlan, Launcher};
pub use runtime::{resolve_runtime, RuntimeSource, ShellRuntime};
pub use spawn::{exit_code_of, ProcessSpawner, Spawner};
