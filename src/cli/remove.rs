use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Module id to remove
    pub module: String,
}
