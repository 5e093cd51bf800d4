//! Update command implementation
//!
//! Smart-syncs installed modules against their sources: new files are
//! copied, user-modified files are preserved. `--force` wipes and
//! reinstalls instead. Manifests are regenerated afterwards, with the raw
//! files index merged so modules outside this run keep their rows.

use console::style;

use crate::cli::UpdateArgs;
use crate::commands::helpers::{self, RunContext};
use crate::discovery;
use crate::error::{Result, module_not_installed};
use crate::installer::Installer;

pub fn run(ctx: &RunContext, args: &UpdateArgs) -> Result<()> {
    let registry = ctx.registry()?;

    let modules = if args.modules.is_empty() {
        discovery::list_modules(ctx.paths.root())
    } else {
        for module in &args.modules {
            if !ctx.paths.is_installed(module) {
                return Err(module_not_installed(module));
            }
        }
        args.modules.clone()
    };

    let installer = Installer::new(registry, &ctx.paths, &ctx.config.pack_dir);
    let mut copied = 0;
    let mut preserved = 0;

    for module in &modules {
        let result = installer.update(module, args.force)?;
        copied += result.files_installed;
        preserved += result.files_preserved.len();

        for file in &result.files_preserved {
            if ctx.verbose {
                println!(
                    "  {} {}/{file}",
                    style("preserving modified:").dim(),
                    module
                );
            }
        }
    }

    let summary = helpers::regenerate_manifests(ctx, &modules, true)?;
    helpers::write_install_manifest(ctx)?;

    println!(
        "{} {} module(s) updated, {copied} file(s) copied, {preserved} preserved",
        style("Done:").green().bold(),
        modules.len()
    );
    println!(
        "{}",
        style(format!(
            "  agents: {}  workflows: {}  tasks/tools: {}",
            summary.agents, summary.workflows, summary.tasks_and_tools
        ))
        .dim()
    );

    Ok(())
}
