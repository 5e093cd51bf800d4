use clap::Parser;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Export command files for every artifact:\n    agentpack export .claude/commands\n\n\
                   Export one-line triggers for tasks and tools:\n    agentpack export .cursor/rules --flat")]
pub struct ExportArgs {
    /// Directory to write command files into
    pub dir: PathBuf,

    /// Write one-line triggers for tasks and tools instead of full command files
    #[arg(long)]
    pub flat: bool,
}
