//! Audit command implementation
//!
//! Scans installed modules for soft references to other modules and reports
//! the ones not covered by a declared dependency. Informational only: the
//! exit code stays zero, since undeclared coupling is a smell, not a fault.

use console::style;

use crate::cli::AuditArgs;
use crate::commands::helpers::RunContext;
use crate::discovery;
use crate::error::Result;
use crate::resolver::{self, RefKind};

pub fn run(ctx: &RunContext, args: &AuditArgs) -> Result<()> {
    let modules = match &args.module {
        Some(module) => vec![module.clone()],
        None => discovery::list_modules(ctx.paths.root()),
    };

    let mut undeclared = 0;
    for module in &modules {
        let declared = ctx
            .registry_opt()
            .map(|registry| registry.dependencies(module))
            .unwrap_or_default();

        let references =
            resolver::scan_references(ctx.paths.root(), module, &ctx.config.pack_dir)?;

        for reference in references {
            if declared.contains(&reference.target_module) {
                continue;
            }
            undeclared += 1;
            let kind = match reference.kind {
                RefKind::Load => "@load",
                RefKind::PathRef => "path",
            };
            println!(
                "{} {} -> {} ({kind}: {})",
                style("undeclared:").yellow(),
                reference.source_module,
                style(&reference.target_module).cyan(),
                reference.path
            );
        }
    }

    if undeclared == 0 {
        println!(
            "{} no undeclared cross-module references in {} module(s)",
            style("Done:").green().bold(),
            modules.len()
        );
    } else {
        println!(
            "{} {undeclared} undeclared reference(s) across {} module(s)",
            style("Done:").green().bold(),
            modules.len()
        );
    }

    Ok(())
}
