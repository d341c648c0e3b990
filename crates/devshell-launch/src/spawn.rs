//! Process boundary: start the runtime and wait for it.

use std::process::ExitStatus;

use crate::config::LaunchConfig;
use crate::error::{LaunchError, Result};

/// Exit code used when a status carries neither a code nor a signal.
const UNKNOWN_EXIT_CODE: i32 = 1;

/// Starts a configured child and returns the code the launcher should exit
/// with.
pub trait Spawner {
    fn spawn(&mut self, config: &LaunchConfig) -> Result<i32>;
}

/// Spawns a real OS process with inherited stdio and blocks until it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn(&mut self, config: &LaunchConfig) -> Result<i32> {
        let mut child = config
            .command()
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: config.program.clone(),
                source,
            })?;
        tracing::debug!(pid = child.id(), "desktop-shell runtime started");
        let status = child.wait().map_err(LaunchError::Wait)?;
        let code = exit_code_of(status);
        tracing::debug!(%status, code, "desktop-shell runtime exited");
        Ok(code)
    }
}

/// Map a child's exit status onto the launcher's own exit code.
///
/// Normal exits pass through unchanged. On unix a signal-terminated child
/// maps to `128 + signo`, the shell convention.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    UNKNOWN_EXIT_CODE
}

#[cfg(all(test, unix))]
mod tests {
    use std::collections::BTreeMap;
    use std::os::unix::process::ExitStatusExt;
    use std::path::PathBuf;

    use super::*;

    fn sh(script: &str, env: &[(&str, &str)]) -> LaunchConfig {
        LaunchConfig {
            program: PathBuf::from("/bin/sh"),
            args: vec!["-c".into(), script.into()],
            cwd: std::env::temp_dir(),
            env: env
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn mirrors_exit_codes() {
        for code in [0, 1, 2, 42, 255] {
            let config = sh(&format!("exit {code}"), &[]);
            assert_eq!(ProcessSpawner.spawn(&config).unwrap(), code);
        }
    }

    #[test]
    fn signal_maps_to_128_plus_signo() {
        let config = sh("kill -TERM $$", &[]);
        assert_eq!(ProcessSpawner.spawn(&config).unwrap(), 128 + 15);
    }

    #[test]
    fn raw_status_mapping() {
        // wait(2) encodings: exit code in the high byte, signal in the low bits.
        assert_eq!(exit_code_of(ExitStatus::from_raw(3 << 8)), 3);
        assert_eq!(exit_code_of(ExitStatus::from_raw(9)), 137);
    }

    #[test]
    fn overrides_merge_onto_inherited_env() {
        let config = sh(
            r#"test "$DEVSHELL_TEST_OVERRIDE" = yes && test -n "$PATH""#,
            &[("DEVSHELL_TEST_OVERRIDE", "yes")],
        );
        assert_eq!(ProcessSpawner.spawn(&config).unwrap(), 0);
    }

    #[test]
    fn runs_in_configured_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), b"").unwrap();
        let mut config = sh("test -f marker", &[]);
        config.cwd = dir.path().to_path_buf();
        assert_eq!(ProcessSpawner.spawn(&config).unwrap(), 0);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut config = sh("", &[]);
        config.program = PathBuf::from("/definitely/not/a/runtime");
        let err = ProcessSpawner.spawn(&config).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert!(err.to_string().contains("/definitely/not/a/runtime"));
    }
}
