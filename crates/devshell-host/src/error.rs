//! Error types for host resolution.

use std::path::PathBuf;

/// Fatal conditions detected while resolving the host and its CLI binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The (platform, architecture) pair has no entry in the support table.
    #[error("unsupported platform/arch: {os}/{arch}")]
    UnsupportedPlatform {
        /// Platform identifier as reported by the host.
        os: String,
        /// Architecture identifier as reported by the host.
        arch: String,
    },

    /// The support table resolved, but the expected binary is absent.
    #[error(
        "CLI not found at: {}\nplease ensure the CLI binary exists in resources/bin/",
        path.display()
    )]
    MissingBinary {
        /// The full resolved path that was checked.
        path: PathBuf,
    },
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_names_the_pair() {
        let err = HostError::UnsupportedPlatform {
            os: "win32".into(),
            arch: "arm64".into(),
        };
        assert_eq!(err.to_string(), "unsupported platform/arch: win32/arm64");
    }

    #[test]
    fn missing_names_the_path() {
        let err = HostError::MissingBinary {
            path: PathBuf::from("/opt/app/resources/bin/linux-x64/codex"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("CLI not found at: /opt/app/resources/bin/linux-x64/codex"));
        assert!(msg.contains("resources/bin/"));
    }
}
