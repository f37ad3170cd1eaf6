use std::collections::HashMap;

use depot_core::scope::Scope;
use petgraph::stable_graph::NodeIndex;

use crate::graph::{DependencyGraph, DisableReason};

/// Filter the graph down to what is visible under `desired`.
///
/// Nodes are visited parents-first. An edge out of the root keeps its
/// declared scope; any other edge takes the scope its source was reached
/// with, combined with its declared scope. Edges whose combined scope is
/// not transitive, or not visible under `desired`, are disabled as
/// `ScopeFiltered`; optional edges below the root are disabled as
/// `Optional` unless `include_optional` is set. Each node ends up with the
/// widest scope among its surviving inbound edges, or none if nothing
/// reaches it.
pub fn reduce_scope(graph: &mut DependencyGraph, desired: Scope, include_optional: bool) -> usize {
    let root = graph.root();
    let mut reached: HashMap<NodeIndex, Scope> = HashMap::new();
    let mut disabled = 0;

    for node in graph.topological_order() {
        let source_scope = if node == root {
            None
        } else {
            match reached.get(&node) {
                Some(scope) => Some(*scope),
                None => continue,
            }
        };

        for (edge, target) in graph.enabled_outgoing(node) {
            let declared = graph.edge(edge).declared;
            if source_scope.is_some() && graph.edge(edge).optional && !include_optional {
                if graph.disable_edge(edge, DisableReason::Optional) {
                    disabled += 1;
                }
                continue;
            }

            let effective = match source_scope {
                None => Some(declared),
                Some(parent) => Scope::combine(parent, declared),
            };
            match effective {
                Some(scope) if desired.includes(scope) => {
                    reached
                        .entry(target)
                        .and_modify(|s| *s = Scope::widest(*s, scope))
                        .or_insert(scope);
                }
                _ => {
                    if graph.disable_edge(edge, DisableReason::ScopeFiltered) {
                        tracing::trace!(to = %graph.node(target), %declared, "filtered by scope");
                        disabled += 1;
                    }
                }
            }
        }
    }

    for node in graph.node_indices() {
        graph.node_mut(node).resolved_scope = reached.get(&node).copied();
    }
    tracing::debug!(%desired, disabled, resolved = reached.len(), "scope reduced");
    disabled
}

/// Disable edges below the root that can never carry their target into any
/// resolution: optional ones (`Optional`, unless `include_optional`) and
/// ones declared `test`, `provided` or `system` (`ScopeFiltered`). Whether
/// such an edge is transitive does not depend on the path to its source,
/// so this can run before distances mean anything.
pub fn flag_intransitive_edges(graph: &mut DependencyGraph, include_optional: bool) -> usize {
    let root = graph.root();
    let mut disabled = 0;
    for edge in graph.edge_indices() {
        let Some((from, _)) = graph.endpoints(edge) else {
            continue;
        };
        if from == root {
            continue;
        }
        let weight = graph.edge(edge);
        let reason = if weight.optional && !include_optional {
            DisableReason::Optional
        } else if Scope::combine(Scope::Compile, weight.declared).is_none() {
            DisableReason::ScopeFiltered
        } else {
            continue;
        };
        if graph.disable_edge(edge, reason) {
            disabled += 1;
        }
    }
    if disabled > 0 {
        tracing::debug!(disabled, "disabled intransitive edges");
    }
    disabled
}
