use clap::Parser;

/// Arguments for the audit command
#[derive(Parser, Debug)]
pub struct AuditArgs {
    /// Module to audit; all installed modules when omitted
    pub module: Option<String>,
}
