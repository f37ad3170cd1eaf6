use crate::graph::DependencyGraph;

/// Remove every enabled edge `a → b` when `b` stays reachable from `a`
/// without it. Edges are examined in declaration order against the graph
/// as already reduced. Removed edges are dropped rather than pruned, so
/// [`find_edge`] no longer reports them.
///
/// [`find_edge`]: DependencyGraph::find_edge
pub fn reduce_transitive_edges(graph: &mut DependencyGraph) -> usize {
    let mut removed = 0;
    for edge in graph.edge_indices() {
        if !graph.edge(edge).is_enabled() {
            continue;
        }
        let Some((from, to)) = graph.endpoints(edge) else {
            continue;
        };
        if graph.has_alternate_path(edge, from, to) {
            graph.remove_edge(edge);
            removed += 1;
        }
    }
    tracing::debug!(removed, "removed redundant edges");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coord, link};
    use depot_core::scope::Scope;

    #[test]
    fn shortcut_edge_is_removed() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        let ab = link(&mut g, "com.example:app:1.0", "org.b:b:1.0", Scope::Compile);
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        link(&mut g, "org.a:a:1.0", "org.b:b:1.0", Scope::Compile);

        assert_eq!(reduce_transitive_edges(&mut g), 1);
        assert_eq!(g.edge_count(), 2);
        assert!(g.endpoints(ab).is_none());
        // b is still reachable
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn chain_is_untouched() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        link(&mut g, "org.a:a:1.0", "org.b:b:1.0", Scope::Compile);
        assert_eq!(reduce_transitive_edges(&mut g), 0);
    }

    #[test]
    fn diamond_keeps_both_branches() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        link(&mut g, "com.example:app:1.0", "org.b:b:1.0", Scope::Compile);
        link(&mut g, "org.a:a:1.0", "org.c:c:1.0", Scope::Compile);
        link(&mut g, "org.b:b:1.0", "org.c:c:1.0", Scope::Compile);
        assert_eq!(reduce_transitive_edges(&mut g), 0);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn reduction_is_stable() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        link(&mut g, "com.example:app:1.0", "org.c:c:1.0", Scope::Compile);
        link(&mut g, "org.a:a:1.0", "org.b:b:1.0", Scope::Compile);
        link(&mut g, "org.b:b:1.0", "org.c:c:1.0", Scope::Compile);
        link(&mut g, "org.a:a:1.0", "org.c:c:1.0", Scope::Compile);

        assert_eq!(reduce_transitive_edges(&mut g), 2);
        assert_eq!(reduce_transitive_edges(&mut g), 0);
    }
}
