use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// List installed modules instead of available ones
    #[arg(long, short = 'i')]
    pub installed: bool,
}
