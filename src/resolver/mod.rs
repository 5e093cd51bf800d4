//! Module dependency resolution
//!
//! Builds a dependency graph from a requested module set and produces an
//! install order where dependencies precede their dependents. Cycles are
//! broken with a recoverable skip (reported, never fatal). Also hosts the
//! best-effort cross-module reference scanner used by `audit`.

pub mod graph;
pub mod references;
pub mod sort;

pub use references::{FileReference, RefKind, scan_references};

use std::collections::BTreeMap;

/// Result of dependency resolution
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Modules in install order (dependencies first)
    pub install_order: Vec<String>,
    /// Module id -> direct dependency ids, for every reachable module
    pub graph: BTreeMap<String, Vec<String>>,
    /// Dependency ids the traversal could not account for
    ///
    /// A lookup returning an empty list reads as "no further dependencies",
    /// not "module not found", so in practice this stays empty; hard
    /// existence checks happen against the module source tree before any
    /// file is touched.
    pub missing: Vec<String>,
    /// Nodes where a dependency cycle was skipped during ordering
    pub cycle_skips: Vec<String>,
}

/// Resolve an install order for the requested modules
///
/// `lookup` returns a module's direct dependencies; a module it cannot find
/// yields an empty list. Dependencies outside the requested set are pulled
/// in transitively.
pub fn resolve<F>(requested: &[String], lookup: F) -> Resolution
where
    F: Fn(&str) -> Vec<String>,
{
    let built = graph::build(requested, lookup);
    let (install_order, cycle_skips) = sort::topological_sort(&built.graph, requested);

    Resolution {
        install_order,
        graph: built.graph,
        missing: built.missing,
        cycle_skips,
    }
}
