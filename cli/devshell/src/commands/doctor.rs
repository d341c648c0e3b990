//! `devshell doctor`: environment diagnostics.

use std::path::Path;

use anyhow::Result;
use devshell_host::compat::detect_compat_layer_with;
use devshell_host::resolve_cli_binary;
use devshell_launch::{resolve_runtime, EnvSnapshot, Launcher};

use crate::manifest::{DevshellManifest, MANIFEST_FILE};

/// Print what a launch would resolve to, without failing on problems.
pub fn run(launcher: &Launcher, manifest: Option<(&DevshellManifest, &Path)>) -> Result<()> {
    print!("{}", report(launcher, &EnvSnapshot::capture(), manifest));
    Ok(())
}

fn report(
    launcher: &Launcher,
    env: &EnvSnapshot,
    manifest: Option<(&DevshellManifest, &Path)>,
) -> String {
    let host = launcher.host();
    let options = launcher.options();
    let mut out = String::new();

    out.push_str("=== Devshell Doctor ===\n\n");
    out.push_str(&format!("devshell version: {}\n\n", env!("CARGO_PKG_VERSION")));

    out.push_str("--- Host ---\n");
    out.push_str(&format!("  Platform: {}\n", host.os));
    out.push_str(&format!("  Arch:     {}\n", host.arch));
    match host.bin_dir() {
        Ok(dir) => out.push_str(&format!("  Support:  supported ({dir})\n")),
        Err(e) => out.push_str(&format!("  Support:  {e}\n")),
    }
    let compat = detect_compat_layer_with(host, &options.kernel_version);
    out.push_str(&format!(
        "  WSL:      {}\n\n",
        if compat.is_wsl() { "detected" } else { "not detected" }
    ));

    out.push_str("--- Install root ---\n");
    out.push_str(&format!("  Root: {}\n", options.root.display()));
    match resolve_cli_binary(&options.root, host) {
        Ok(binary) => {
            let status = if binary.exists() { "found" } else { "MISSING" };
            out.push_str(&format!("  CLI:  {} [{status}]\n", binary.path.display()));
        }
        Err(_) => out.push_str("  CLI:  (no binary for this host)\n"),
    }
    match resolve_runtime(&options.root, &host.os, options.runtime.as_deref(), env) {
        Ok(runtime) => out.push_str(&format!(
            "  Runtime: {} [{:?}]\n",
            runtime.path.display(),
            runtime.source
        )),
        Err(e) => out.push_str(&format!("  Runtime: {e}\n")),
    }
    out.push('\n');

    out.push_str("--- Configuration ---\n");
    match manifest {
        Some((_, dir)) => out.push_str(&format!(
            "  {MANIFEST_FILE}: found at {}\n",
            dir.display()
        )),
        None => out.push_str(&format!("  {MANIFEST_FILE}: not found\n")),
    }
    out.push_str(&format!("  Build flavor default: {}\n", options.defaults.build_flavor));
    out.push_str(&format!("  Renderer URL default: {}\n", options.defaults.renderer_url));
    out
}
