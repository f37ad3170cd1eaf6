use depot_core::scope::Scope;

use crate::graph::DependencyGraph;

/// Rewrite the scope of every reachable enabled edge to its effective
/// scope: the declared scope for edges out of the root, otherwise the
/// source's resolved scope combined with the declared scope.
pub fn update_scopes(graph: &mut DependencyGraph) -> usize {
    let root = graph.root();
    let mut updated = 0;
    for node in graph.reachable() {
        let source_scope = graph.node(node).resolved_scope;
        for (edge, _) in graph.enabled_outgoing(node) {
            let declared = graph.edge(edge).declared;
            let effective = if node == root {
                Some(declared)
            } else {
                source_scope.and_then(|parent| Scope::combine(parent, declared))
            };
            let Some(scope) = effective else {
                continue;
            };
            let edge = graph.edge_mut(edge);
            if edge.scope != scope {
                edge.scope = scope;
                updated += 1;
            }
        }
    }
    updated
}
