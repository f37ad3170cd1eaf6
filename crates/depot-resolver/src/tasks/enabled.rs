use crate::graph::DependencyGraph;

/// Move disabled edges out of the live graph so later passes only see
/// enabled ones.
pub fn reduce_enabled_edges(graph: &mut DependencyGraph) -> usize {
    let pruned = graph.prune_disabled();
    tracing::debug!(pruned, "pruned disabled edges");
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DisableReason;
    use crate::test_support::{coord, link};
    use depot_core::scope::Scope;

    #[test]
    fn only_enabled_edges_remain() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        let e = link(&mut g, "org.a:a:1.0", "org.b:b:1.0", Scope::Compile);
        g.disable_edge(e, DisableReason::Excluded);

        assert_eq!(reduce_enabled_edges(&mut g), 1);
        assert!(g.edge_indices().iter().all(|&e| g.edge(e).is_enabled()));
        assert_eq!(reduce_enabled_edges(&mut g), 0);
    }
}
