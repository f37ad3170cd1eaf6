//! Dependency graph engine: builds the raw graph of declared dependencies,
//! then runs the reduction pipeline (cycles, exclusions, conflict mediation,
//! scope filtering, transitive reduction) to leave the resolved graph.

pub mod builder;
pub mod cache;
pub mod conflict;
pub mod graph;
pub mod listener;
pub mod pipeline;
pub mod resolver;
pub mod tasks;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{GraphBuilder, PomGraphBuilder};
pub use graph::{DependencyGraph, DisableReason, EdgeState, GraphEdge, GraphNode};
pub use listener::{GraphListener, PhaseKind, TracingListener};
pub use pipeline::{TaskContext, TaskKind, TaskPipeline};
pub use resolver::Resolver;
