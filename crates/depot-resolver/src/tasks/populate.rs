use depot_util::errors::DepotError;

use crate::builder::GraphBuilder;
use crate::graph::DependencyGraph;

/// Fill the graph with everything the builder produces for its root.
pub fn populate(graph: &mut DependencyGraph, builder: &dyn GraphBuilder) -> Result<usize, DepotError> {
    let root = graph.root_node().coordinate.clone();
    let built = builder.build(&root)?;
    let before = graph.node_count();
    graph.absorb(built)?;
    Ok(graph.node_count() - before)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coord, link};
    use depot_core::coordinate::Coordinate;
    use depot_core::scope::Scope;

    struct Fixed;

    impl GraphBuilder for Fixed {
        fn build(&self, root: &Coordinate) -> Result<DependencyGraph, DepotError> {
            let mut g = DependencyGraph::new(root.clone());
            link(&mut g, &root.to_string(), "org.a:a:1.0", Scope::Compile);
            Ok(g)
        }
    }

    struct Failing;

    impl GraphBuilder for Failing {
        fn build(&self, root: &Coordinate) -> Result<DependencyGraph, DepotError> {
            Err(DepotError::metadata(root, "offline"))
        }
    }

    #[test]
    fn absorbs_built_graph() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        assert_eq!(populate(&mut g, &Fixed).unwrap(), 1);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn builder_errors_pass_through() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        let err = populate(&mut g, &Failing).unwrap_err();
        assert!(matches!(err, DepotError::MetadataUnavailable { .. }));
    }
}
