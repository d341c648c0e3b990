//! `devshell start`: resolve, then run the desktop shell.

use anyhow::{bail, Result};
use devshell_launch::{LaunchPlan, Launcher, ProcessSpawner};

/// Launch and return the child's exit code. With `dry_run`, print the plan
/// instead and return 0.
pub fn run(launcher: &Launcher, dry_run: bool, format: Option<&str>) -> Result<i32> {
    if dry_run {
        let plan = launcher.prepare()?;
        print!("{}", render_plan(&plan, format)?);
        return Ok(0);
    }
    Ok(launcher.run(&mut ProcessSpawner)?)
}

/// Render a plan as human-readable text (default) or JSON.
pub fn render_plan(plan: &LaunchPlan, format: Option<&str>) -> Result<String> {
    match format {
        None | Some("human") => Ok(render_human(plan)),
        Some("json") => Ok(serde_json::to_string_pretty(plan)? + "\n"),
        Some(other) => bail!("unknown format: '{other}'. Available formats: human, json"),
    }
}

fn render_human(plan: &LaunchPlan) -> String {
    let mut out = String::new();
    out.push_str("=== Launch Plan ===\n");
    out.push_str(&format!("Platform: {}\n", plan.host));
    out.push_str(&format!("CLI path: {}\n", plan.binary.path.display()));
    out.push_str(&format!(
        "WSL:      {}\n",
        if plan.compat.is_wsl() {
            "detected (software rendering forced)"
        } else {
            "not detected"
        }
    ));
    out.push_str(&format!("Runtime:  {}\n", plan.runtime.path.display()));
    out.push_str(&format!("Cwd:      {}\n", plan.config.cwd.display()));
    out.push('\n');
    out.push_str("--- Environment overrides ---\n");
    for (key, value) in &plan.config.env {
        out.push_str(&format!("  {key}={value}\n"));
    }
    out.push('\n');
    out.push_str("--- Command ---\n");
    out.push_str(&format!("  {}\n", plan.config.display_command()));
    out
}
