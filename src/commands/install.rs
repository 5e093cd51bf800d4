//! Install command implementation
//!
//! The full run: select modules, resolve dependencies, fail fast on
//! unsatisfiable requirements, clean-install each module in dependency
//! order, re-discover the pack, and regenerate every manifest. Installation
//! touches no files until every module in the install order has a source.

use console::style;

use crate::cli::InstallArgs;
use crate::commands::helpers::{self, RunContext};
use crate::error::{AgentpackError, Result};
use crate::installer::Installer;
use crate::progress::ProgressDisplay;
use crate::resolver;

pub fn run(ctx: &RunContext, args: &InstallArgs) -> Result<()> {
    let registry = ctx.registry()?;

    let requested = select_modules(ctx, args)?;
    let resolution = resolver::resolve(&requested, |id| registry.dependencies(id));

    if ctx.verbose {
        for node in &resolution.cycle_skips {
            eprintln!(
                "{} dependency cycle skipped at '{node}'",
                style("warning:").yellow()
            );
        }
        for (module, deps) in &resolution.graph {
            if !deps.is_empty() {
                println!("{}", style(format!("  {module} -> {}", deps.join(", "))).dim());
            }
        }
    }

    // Hard existence check before any file is touched
    let mut unresolved: Vec<String> = resolution
        .install_order
        .iter()
        .filter(|id| registry.find_source(id).is_none())
        .cloned()
        .collect();
    unresolved.extend(resolution.missing.iter().cloned());
    if !unresolved.is_empty() {
        unresolved.sort();
        unresolved.dedup();
        return Err(AgentpackError::MissingDependencies {
            modules: unresolved,
        });
    }

    println!(
        "Installing {} module(s) into {}",
        resolution.install_order.len(),
        style(ctx.paths.root().display()).cyan()
    );

    let installer = Installer::new(registry, &ctx.paths, &ctx.config.pack_dir);
    let progress = ProgressDisplay::new(resolution.install_order.len() as u64);

    for module in &resolution.install_order {
        progress.update_module(module);
        let result = installer
            .install(module, |file| progress.update_file(file))
            .inspect_err(|_| progress.abandon())?;
        progress.inc_module();

        if ctx.verbose {
            println!(
                "  {} {} ({} files) at {}",
                style("installed").green(),
                result.module,
                result.files_installed,
                style(result.path.display()).dim()
            );
        }
    }
    progress.finish();

    let summary = helpers::regenerate_manifests(ctx, &resolution.install_order, true)?;
    helpers::write_install_manifest(ctx)?;

    println!(
        "{} {} module(s) installed",
        style("Done:").green().bold(),
        resolution.install_order.len()
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

/// The requested module set: explicit ids, or the default-selected set;
/// `core` is auto-included whenever the source tree provides it
fn select_modules(ctx: &RunContext, args: &InstallArgs) -> Result<Vec<String>> {
    let registry = ctx.registry()?;
    let mut requested = args.modules.clone();

    if requested.is_empty() {
        let (modules, custom) = registry.list_available()?;
        requested = modules
            .into_iter()
            .chain(custom)
            .filter(|meta| meta.default_selected)
            .map(|meta| meta.id)
            .collect();
    }

    if registry.has_core() && !requested.iter().any(|id| id == "core") {
        requested.insert(0, "core".to_string());
    }

    Ok(requested)
}
