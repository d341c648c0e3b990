//! Host identity for the devshell launcher.
//!
//! Answers three questions about the machine the launcher runs on:
//! - **Platform:** which OS/architecture pair this is, and whether a
//!   prebuilt CLI binary ships for it
//! - **Layout:** where that binary lives under the install root
//! - **Compatibility layer:** whether the Linux kernel is really WSL

pub mod compat;
pub mod error;
pub mod layout;
pub mod platform;

pub use compat::{detect_compat_layer, CompatLayer};
pub use error::{HostError, Result};
pub use layout::{locate_cli_binary, resolve_cli_binary, CliBinary};
pub use platform::{supported_targets, HostArch, HostOs, HostPlatform};
