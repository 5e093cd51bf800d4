//! agentpack - declarative module installer for AI agent packs
//!
//! Installs, updates, and synchronizes declaratively-defined modules
//! (agents, workflows, tasks, tools) into a project directory, and compiles
//! agent definitions into the documents downstream consumers load.

use clap::Parser;

mod cli;
mod commands;
mod compiler;
mod config;
mod discovery;
mod error;
mod generate;
mod hash;
mod installer;
mod manifest;
mod pack;
mod progress;
mod registry;
mod resolver;
mod template;

use cli::{Cli, Commands};
use commands::helpers::RunContext;
use error::Result;

fn dispatch(cli: Cli) -> Result<()> {
    // Completions need no project context
    if let Commands::Completions(args) = &cli.command {
        return commands::completions::run(args);
    }

    let ctx = RunContext::new(cli.project, cli.source, cli.verbose)?;

    match &cli.command {
        Commands::Install(args) => commands::install::run(&ctx, args),
        Commands::Update(args) => commands::update::run(&ctx, args),
        Commands::Remove(args) => commands::remove::run(&ctx, args),
        Commands::List(args) => commands::list::run(&ctx, args),
        Commands::Compile(args) => commands::compile::run(&ctx, args),
        Commands::Export(args) => commands::export::run(&ctx, args),
        Commands::Audit(args) => commands::audit::run(&ctx, args),
        // handled before the context is built
        Commands::Completions(_) => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
