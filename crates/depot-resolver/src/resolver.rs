//! Entry point: resolve one root coordinate for a scope.

use std::sync::Arc;

use depot_core::coordinate::Coordinate;
use depot_core::scope::Scope;
use depot_util::errors::DepotError;

use crate::builder::GraphBuilder;
use crate::graph::DependencyGraph;
use crate::listener::GraphListener;
use crate::pipeline::{TaskContext, TaskPipeline};

/// Resolves dependency graphs. Cheap to share; each call builds its own
/// graph, so concurrent resolutions do not interact.
#[derive(Clone)]
pub struct Resolver {
    builder: Arc<dyn GraphBuilder>,
    pipeline: TaskPipeline,
    include_optional: bool,
}

impl Resolver {
    pub fn new(builder: impl GraphBuilder + 'static) -> Self {
        Self {
            builder: Arc::new(builder),
            pipeline: TaskPipeline::new(),
            include_optional: false,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn GraphListener>) -> Self {
        self.pipeline.add_listener(listener);
        self
    }

    /// Keep optional dependencies of dependencies.
    pub fn include_optional(mut self, include: bool) -> Self {
        self.include_optional = include;
        self
    }

    /// Build and reduce the graph for `root` as seen from `scope`.
    pub fn resolve(&self, root: &Coordinate, scope: Scope) -> Result<DependencyGraph, DepotError> {
        tracing::debug!(%root, %scope, "resolving");
        let mut graph = DependencyGraph::new(root.clone());
        let ctx = TaskContext {
            builder: self.builder.as_ref(),
            scope,
            include_optional: self.include_optional,
        };
        self.pipeline.run(&mut graph, &ctx)?;
        Ok(graph)
    }

    /// [`Resolver::resolve`] from string forms of the coordinate and scope.
    pub fn resolve_str(&self, root: &str, scope: &str) -> Result<DependencyGraph, DepotError> {
        let root = Coordinate::parse(root)?;
        let scope: Scope = scope.parse()?;
        self.resolve(&root, scope)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("pipeline", &self.pipeline)
            .field("include_optional", &self.include_optional)
            .finish()
    }
}
