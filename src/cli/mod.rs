//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - update: Update command arguments
//! - remove: Remove command arguments
//! - list: List command arguments
//! - compile: Compile command arguments
//! - audit: Audit command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod audit;
pub mod compile;
pub mod completions;
pub mod export;
pub mod install;
pub mod list;
pub mod remove;
pub mod update;

pub use audit::AuditArgs;
pub use compile::CompileArgs;
pub use completions::CompletionsArgs;
pub use export::ExportArgs;
pub use install::InstallArgs;
pub use list::ListArgs;
pub use remove::RemoveArgs;
pub use update::UpdateArgs;

/// agentpack - module installer for AI agent packs
#[derive(Parser, Debug)]
#[command(
    name = "agentpack",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Declarative module installer and compiler for AI agent packs",
    long_about = "agentpack installs, updates, and synchronizes declaratively-defined modules \
                  (agents, workflows, tasks, tools) into a project, then compiles agent \
                  definitions into the documents consumers load.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  agentpack install bmm              \x1b[90m# Install a module and its dependencies\x1b[0m\n   \
                  agentpack update --force           \x1b[90m# Wipe and reinstall every installed module\x1b[0m\n   \
                  agentpack compile sage.agent.yaml  \x1b[90m# Compile an agent definition\x1b[0m\n   \
                  agentpack list --installed         \x1b[90m# List installed modules\x1b[0m\n   \
                  agentpack audit bmm                \x1b[90m# Report undeclared cross-module references\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "AGENTPACK_PROJECT")]
    pub project: Option<PathBuf>,

    /// Module source tree (overrides agentpack.yaml)
    #[arg(long, short = 's', global = true, env = "AGENTPACK_SOURCE")]
    pub source: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install modules and their dependencies into the pack
    Install(InstallArgs),

    /// Update installed modules, preserving user-modified files
    Update(UpdateArgs),

    /// Remove an installed module and its sidecars
    Remove(RemoveArgs),

    /// List available or installed modules
    List(ListArgs),

    /// Compile an agent definition to its output document
    Compile(CompileArgs),

    /// Export consumer-neutral command files for discovered artifacts
    Export(ExportArgs),

    /// Report undeclared cross-module references
    Audit(AuditArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_install() {
        let cli = Cli::try_parse_from(["agentpack", "install", "bmm"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert_eq!(args.modules, vec!["bmm".to_string()]),
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_list() {
        let cli = Cli::try_parse_from(["agentpack", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "agentpack",
            "-v",
            "-p",
            "/tmp/project",
            "-s",
            "/tmp/modules",
            "list",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.source, Some(PathBuf::from("/tmp/modules")));
    }

    #[test]
    fn test_cli_parsing_remove_requires_module() {
        assert!(Cli::try_parse_from(["agentpack", "remove"]).is_err());
        let cli = Cli::try_parse_from(["agentpack", "remove", "bmm"]).unwrap();
        match cli.command {
            Commands::Remove(args) => assert_eq!(args.module, "bmm"),
            _ => panic!("Expected Remove command"),
        }
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["agentpack", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, "bash"),
            _ => panic!("Expected Completions command"),
        }
    }
}
