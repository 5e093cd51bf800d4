use clap::Parser;

/// Arguments for the update command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Smart-sync every installed module:\n    agentpack update\n\n\
                   Smart-sync one module:\n    agentpack update bmm\n\n\
                   Wipe and reinstall:\n    agentpack update bmm --force")]
pub struct UpdateArgs {
    /// Module ids to update; all installed modules when none given
    pub modules: Vec<String>,

    /// Wipe and reinstall instead of smart sync (discards user edits)
    #[arg(long, short = 'f')]
    pub force: bool,
}
