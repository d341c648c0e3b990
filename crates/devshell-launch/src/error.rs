//! Launch error types.

use std::path::PathBuf;

use devshell_host::HostError;

/// Errors that stop a launch.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// Unsupported platform or missing CLI binary.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The desktop-shell runtime executable could not be located.
    #[error("desktop-shell runtime not found: {detail}")]
    RuntimeNotFound { detail: String },

    /// The child process could not be started.
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child process failed.
    #[error("failed to wait for desktop-shell runtime: {0}")]
    Wait(#[source] std::io::Error),
}

/// Result type for launch operations.
pub type Result<T> = std::result::Result<T, LaunchError>;
