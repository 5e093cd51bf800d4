//! Completions command implementation

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::{Cli, CompletionsArgs};
use crate::error::{AgentpackError, Result};

pub fn run(args: &CompletionsArgs) -> Result<()> {
    let shell: Shell =
        args.shell
            .parse()
            .map_err(|_| AgentpackError::ConfigParseFailed {
                path: args.shell.clone(),
                reason: "unknown shell (expected bash, zsh, fish, powershell, or elvish)"
                    .to_string(),
            })?;

    let mut command = Cli::command();
    generate(shell, &mut command, "agentpack", &mut std::io::stdout());
    Ok(())
}
