//! Topological ordering with recoverable cycle skips
//!
//! Depth-first post-order walk over the dependency graph with an explicit
//! three-state mark per node:
//!
//! 1. `Unvisited`: not yet reached
//! 2. `Visiting`: on the active traversal path
//! 3. `Done`: emitted to the result
//!
//! Re-entering a `Visiting` node means a cycle. It is skipped — the node
//! will still be emitted exactly once, further up the unwind — and recorded
//! so callers can surface it. Ordering within a cycle is traversal-order
//! dependent; for acyclic subgraphs the result is a true topological order.

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Visiting,
    Done,
}

struct SortContext<'a> {
    graph: &'a BTreeMap<String, Vec<String>>,
    state: HashMap<String, VisitState>,
    order: Vec<String>,
    cycle_skips: Vec<String>,
}

/// Sort the graph into install order (dependencies before dependents)
///
/// Requested modules are visited first, in the order the user gave them;
/// remaining graph keys follow lexicographically. Every node is emitted
/// exactly once. Returns the order plus the nodes at which a cycle was
/// skipped.
pub fn topological_sort(
    graph: &BTreeMap<String, Vec<String>>,
    requested: &[String],
) -> (Vec<String>, Vec<String>) {
    let mut ctx = SortContext {
        graph,
        state: HashMap::new(),
        order: Vec::new(),
        cycle_skips: Vec::new(),
    };

    for id in requested {
        if graph.contains_key(id) {
            visit(&mut ctx, id);
        }
    }

    // BTreeMap keys iterate sorted, so the remainder is deterministic
    for id in graph.keys() {
        visit(&mut ctx, id);
    }

    (ctx.order, ctx.cycle_skips)
}

fn visit(ctx: &mut SortContext, id: &str) {
    match ctx.state.get(id).copied().unwrap_or(VisitState::Unvisited) {
        VisitState::Done => return,
        VisitState::Visiting => {
            // Cycle: skip rather than error, but keep the evidence
            ctx.cycle_skips.push(id.to_string());
            return;
        }
        VisitState::Unvisited => {}
    }

    ctx.state.insert(id.to_string(), VisitState::Visiting);

    if let Some(deps) = ctx.graph.get(id) {
        for dep in deps {
            visit(ctx, dep);
        }
    }

    ctx.state.insert(id.to_string(), VisitState::Done);
    ctx.order.push(id.to_string());
}
