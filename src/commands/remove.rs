//! Remove command implementation

use console::style;

use crate::cli::RemoveArgs;
use crate::commands::helpers::{self, RunContext};
use crate::error::Result;
use crate::installer::Installer;
use crate::registry::Registry;

pub fn run(ctx: &RunContext, args: &RemoveArgs) -> Result<()> {
    // Removal works without a configured source tree; sidecar ownership is
    // then unknown and sidecars stay in place.
    let fallback;
    let registry: &Registry = match ctx.registry_opt() {
        Some(registry) => registry,
        None => {
            fallback = Registry::new(ctx.project_root.join("modules"));
            &fallback
        }
    };

    let installer = Installer::new(registry, &ctx.paths, &ctx.config.pack_dir);
    installer.remove(&args.module)?;

    regenerate_if_pack_remains(ctx)?;

    println!(
        "{} module '{}' removed",
        style("Done:").green().bold(),
        args.module
    );
    Ok(())
}

fn regenerate_if_pack_remains(ctx: &RunContext) -> Result<()> {
    if !ctx.paths.root().is_dir() {
        return Ok(());
    }
    let remaining = crate::discovery::list_modules(ctx.paths.root());
    helpers::regenerate_manifests(ctx, &remaining, false)?;
    helpers::write_install_manifest(ctx)
}
