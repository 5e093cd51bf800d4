//! Dependency graph construction
//!
//! Depth-first expansion seeded from the requested module set. Every module
//! reachable over dependency edges becomes a graph key, including modules
//! the user never asked for (auto-inclusion).

use std::collections::{BTreeMap, HashSet};

/// Graph build output
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    pub graph: BTreeMap<String, Vec<String>>,
    /// Dependency ids referenced by an edge but never expanded into a key.
    /// Empty in practice: a failed lookup returns an empty dependency list
    /// and the node is still keyed.
    pub missing: Vec<String>,
}

/// Build the dependency graph from the requested set
pub fn build<F>(requested: &[String], lookup: F) -> BuiltGraph
where
    F: Fn(&str) -> Vec<String>,
{
    let mut graph = BTreeMap::new();
    let mut visited = HashSet::new();

    for id in requested {
        expand(id, &lookup, &mut graph, &mut visited);
    }

    // Anything referenced by an edge must have been expanded into a key;
    // collect the remainder as unaccounted-for.
    let mut missing: Vec<String> = graph
        .values()
        .flatten()
        .filter(|dep| !graph.contains_key(*dep))
        .cloned()
        .collect();
    missing.sort();
    missing.dedup();

    BuiltGraph { graph, missing }
}

fn expand<F>(
    id: &str,
    lookup: &F,
    graph: &mut BTreeMap<String, Vec<String>>,
    visited: &mut HashSet<String>,
) where
    F: Fn(&str) -> Vec<String>,
{
    if visited.contains(id) {
        return;
    }
    visited.insert(id.to_string());

    let deps = lookup(id);
    graph.insert(id.to_string(), deps.clone());

    for dep in deps {
        expand(&dep, lookup, graph, visited);
    }
}
