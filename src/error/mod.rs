//! Error types and handling for agentpack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Variants are grouped by domain: module lookup, resolution, installation,
//! compilation, manifests, configuration, and file system.
//!
//! Fatal errors (resolution, module-not-found) abort the run. Parse failures
//! in optional inputs (descriptors, manifests, front matter) are handled
//! locally by falling back to a scan or an empty result; they never surface
//! through this type. A drift-skip during smart sync is not an error at all.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for agentpack operations
#[derive(Error, Diagnostic, Debug)]
pub enum AgentpackError {
    // Module errors
    #[error("Source for module '{name}' not found")]
    #[diagnostic(
        code(agentpack::module::not_found),
        help("Check the module id and that --source points at a module source tree")
    )]
    ModuleNotFound { name: String },

    #[error("Module '{name}' is not installed")]
    #[diagnostic(
        code(agentpack::module::not_installed),
        help("Run `agentpack install {name}` first")
    )]
    ModuleNotInstalled { name: String },

    #[error("No module source tree configured")]
    #[diagnostic(
        code(agentpack::module::source_not_configured),
        help("Pass --source, set AGENTPACK_SOURCE, or add source_root to agentpack.yaml")
    )]
    SourceNotConfigured,

    // Resolution errors
    #[error("Missing dependencies: {}", modules.join(", "))]
    #[diagnostic(
        code(agentpack::resolve::missing_dependencies),
        help("Every dependency must exist in the module source tree")
    )]
    MissingDependencies { modules: Vec<String> },

    // Compiler errors
    #[error("Failed to parse agent definition {path}: {reason}")]
    #[diagnostic(
        code(agentpack::compile::parse_failed),
        help("The definition must contain a top-level `agent:` mapping with `metadata:`")
    )]
    DefinitionParseFailed { path: String, reason: String },

    #[error("Agent definition not found: {path}")]
    #[diagnostic(code(agentpack::compile::definition_not_found))]
    DefinitionNotFound { path: String },

    // Manifest errors
    #[error("Failed to parse manifest {path}: {reason}")]
    #[diagnostic(code(agentpack::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    // Config errors
    #[error("Failed to parse config {path}: {reason}")]
    #[diagnostic(code(agentpack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid answer '{input}': expected key=value")]
    #[diagnostic(code(agentpack::config::invalid_answer))]
    InvalidAnswer { input: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(agentpack::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {reason}")]
    #[diagnostic(code(agentpack::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    #[diagnostic(code(agentpack::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(agentpack::fs::io))]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AgentpackError>;

pub fn module_not_found(name: impl Into<String>) -> AgentpackError {
    AgentpackError::ModuleNotFound { name: name.into() }
}

pub fn module_not_installed(name: impl Into<String>) -> AgentpackError {
    AgentpackError::ModuleNotInstalled { name: name.into() }
}

pub fn file_read_failed(path: &std::path::Path, e: &std::io::Error) -> AgentpackError {
    AgentpackError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

pub fn file_write_failed(path: &std::path::Path, e: &std::io::Error) -> AgentpackError {
    AgentpackError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_module_not_found() {
        let err = module_not_found("bmm");
        assert_eq!(err.to_string(), "Source for module 'bmm' not found");
    }

    #[test]
    fn test_error_display_missing_dependencies() {
        let err = AgentpackError::MissingDependencies {
            modules: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "Missing dependencies: a, b");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AgentpackError = io.into();
        assert!(matches!(err, AgentpackError::Io(_)));
    }
}
