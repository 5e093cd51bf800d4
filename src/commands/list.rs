//! List command implementation

use console::style;

use crate::cli::ListArgs;
use crate::commands::helpers::RunContext;
use crate::discovery;
use crate::error::Result;
use crate::manifest;
use crate::registry::ModuleMeta;

pub fn run(ctx: &RunContext, args: &ListArgs) -> Result<()> {
    if args.installed {
        list_installed(ctx)
    } else {
        list_available(ctx)
    }
}

fn list_available(ctx: &RunContext) -> Result<()> {
    let registry = ctx.registry()?;
    let (modules, custom) = registry.list_available()?;

    if modules.is_empty() && custom.is_empty() {
        println!("No modules available in the source tree.");
        return Ok(());
    }

    if !modules.is_empty() {
        println!("{}", style("Available modules:").bold());
        for meta in &modules {
            print_module(meta);
        }
    }

    if !custom.is_empty() {
        println!("{}", style("Custom modules:").bold());
        for meta in &custom {
            print_module(meta);
        }
    }

    Ok(())
}

fn print_module(meta: &ModuleMeta) {
    let marker = if meta.default_selected { "*" } else { " " };
    println!(
        " {marker} {} {} {} {}",
        style(&meta.id).cyan(),
        style(&meta.version).dim(),
        meta.display_name,
        style(&meta.description).dim()
    );
}

fn list_installed(ctx: &RunContext) -> Result<()> {
    let modules = discovery::list_modules(ctx.paths.root());
    if modules.is_empty() {
        println!("No modules installed.");
        return Ok(());
    }

    let recorded = manifest::read_install_manifest(&ctx.paths.install_manifest());

    println!("{}", style("Installed modules:").bold());
    for module in &modules {
        let version = recorded
            .as_ref()
            .and_then(|m| m.modules.iter().find(|r| &r.id == module))
            .map(|r| r.version.clone())
            .unwrap_or_else(|| "?".to_string());
        println!("   {} {}", style(module).cyan(), style(version).dim());
    }

    Ok(())
}
