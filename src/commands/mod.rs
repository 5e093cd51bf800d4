//! Command implementations
//!
//! Each submodule implements one CLI command with the signature
//! `run(ctx, args) -> Result<()>`, orchestrating the resolver, installer,
//! discovery, and manifest layers.

pub mod audit;
pub mod compile;
pub mod completions;
pub mod export;
pub mod helpers;
pub mod install;
pub mod list;
pub mod remove;
pub mod update;
