//! devshell: development launcher for the desktop shell.
//!
//! Finds the prebuilt CLI binary for this host, applies the WSL graphics
//! workaround when needed, runs the desktop-shell runtime with inherited
//! stdio and exits with its exit code.

mod commands;
mod logging;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use devshell_launch::{LaunchOptions, Launcher};

use manifest::DevshellManifest;

#[derive(Parser)]
#[command(name = "devshell", version, about = "Launch the desktop shell for development")]
struct Cli {
    /// Log debug detail (DEVSHELL_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the CLI binary and run the desktop shell (default)
    Start(StartArgs),
    /// Show what a launch would resolve to on this host
    Doctor {
        /// Install root (default: directory of devshell.toml, else the
        /// current directory; not the launcher's own location)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// List hosts with a prebuilt CLI binary
    Targets,
}

#[derive(Args, Default)]
struct StartArgs {
    /// Install root (default: directory of devshell.toml, else the current
    /// directory; not the launcher's own location)
    #[arg(long)]
    root: Option<PathBuf>,
    /// Desktop-shell runtime executable, relative to the install root
    /// (default: node_modules/electron)
    #[arg(long)]
    runtime: Option<PathBuf>,
    /// Build flavor used when BUILD_FLAVOR is unset
    #[arg(long)]
    flavor: Option<String>,
    /// Print the launch plan without starting anything
    #[arg(long)]
    dry_run: bool,
    /// Plan output format for --dry-run (human, json)
    #[arg(long, requires = "dry_run")]
    format: Option<String>,
    /// Extra arguments passed to the runtime after the application root
    #[arg(last = true)]
    runtime_args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir()?;

    match cli.command.unwrap_or(Commands::Start(StartArgs::default())) {
        Commands::Start(args) => {
            let manifest = load_manifest(&cwd, args.root.as_deref())?;
            let options = start_options(&cwd, manifest.as_ref(), &args);
            let launcher = Launcher::from_environment(options);
            commands::start::run(&launcher, args.dry_run, args.format.as_deref())
        }

        Commands::Doctor { root } => {
            let manifest = load_manifest(&cwd, root.as_deref())?;
            let args = StartArgs {
                root,
                ..Default::default()
            };
            let options = start_options(&cwd, manifest.as_ref(), &args);
            let launcher = Launcher::from_environment(options);
            commands::doctor::run(
                &launcher,
                manifest.as_ref().map(|(m, dir)| (m, dir.as_path())),
            )?;
            Ok(0)
        }

        Commands::Targets => {
            commands::targets::list(&devshell_host::HostPlatform::current())?;
            Ok(0)
        }
    }
}

/// Find `devshell.toml`, walking up from `--root` when given, else from `cwd`.
fn load_manifest(cwd: &Path, root: Option<&Path>) -> Result<Option<(DevshellManifest, PathBuf)>> {
    let start = root.map_or_else(|| cwd.to_path_buf(), |r| cwd.join(r));
    let found = DevshellManifest::find_and_load(&start)?;
    match &found {
        Some((_, dir)) => tracing::debug!(
            path = %dir.join(manifest::MANIFEST_FILE).display(),
            "loaded project config"
        ),
        None => tracing::debug!(search_from = %start.display(), "no project config found"),
    }
    Ok(found)
}

/// Combine flags, `devshell.toml` and the cwd into launch options.
///
/// Install root: `--root`, else the manifest directory, else `cwd`. The
/// runtime path, from `--runtime` or the manifest, stays relative to that
/// root.
fn start_options(
    cwd: &Path,
    manifest: Option<&(DevshellManifest, PathBuf)>,
    args: &StartArgs,
) -> LaunchOptions {
    let root = match (&args.root, manifest) {
        (Some(root), _) => cwd.join(root),
        (None, Some((_, dir))) => dir.clone(),
        (None, None) => cwd.to_path_buf(),
    };
    tracing::debug!(root = %root.display(), "install root");
    let config = manifest.map(|(m, _)| m.clone()).unwrap_or_default();

    let mut options = LaunchOptions::new(root);
    options.runtime = args.runtime.clone().or(config.runtime.path.clone());
    options.extra_args = config.runtime.args.clone();
    options.extra_args.extend(args.runtime_args.iter().cloned());
    options.defaults = config.launch_defaults(args.flavor.as_deref());
    options
}
