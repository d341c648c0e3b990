//! `devshell targets`: list hosts with a prebuilt CLI binary.

use anyhow::Result;
use devshell_host::{supported_targets, HostPlatform};

/// Print the support table, marking the current host.
pub fn list(current: &HostPlatform) -> Result<()> {
    print!("{}", render(current));
    Ok(())
}

fn render(current: &HostPlatform) -> String {
    let mut out = String::from("Supported hosts:\n\n");
    for entry in supported_targets() {
        let marker = if entry.os == current.os && entry.arch == current.arch {
            "*"
        } else {
            " "
        };
        let file = entry.os.cli_file_name();
        out.push_str(&format!(
            "{marker} {:<8} {:<6} resources/bin/{}/{file}\n",
            entry.os.as_str(),
            entry.arch.as_str(),
            entry.dir
        ));
    }
    if !current.is_supported() {
        out.push_str(&format!("\nCurrent host {current} is not supported.\n"));
    }
    out
}
