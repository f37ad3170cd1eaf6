//! Observers of graph resolution.

use depot_util::errors::DepotError;

use crate::graph::DependencyGraph;
use crate::pipeline::TaskKind;

/// Where in the pipeline an event was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Graph created, nothing run yet.
    New,
    /// About to run a task.
    TaskPre,
    /// A task finished successfully.
    TaskPost,
    /// Every task finished.
    Done,
}

/// Receives pipeline events. Listeners see the graph read-only; returning
/// an error aborts the resolution with that error.
pub trait GraphListener: Send + Sync {
    fn on_phase(
        &self,
        _phase: PhaseKind,
        _task: Option<TaskKind>,
        _graph: &DependencyGraph,
    ) -> Result<(), DepotError> {
        Ok(())
    }

    /// Called once when a task fails, with the wrapped task error.
    fn on_error(&self, _error: &DepotError, _graph: &DependencyGraph) -> Result<(), DepotError> {
        Ok(())
    }
}

/// Logs pipeline progress through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl GraphListener for TracingListener {
    fn on_phase(
        &self,
        phase: PhaseKind,
        task: Option<TaskKind>,
        graph: &DependencyGraph,
    ) -> Result<(), DepotError> {
        let root = graph.root_node();
        match (phase, task) {
            (PhaseKind::New, _) => tracing::debug!(%root, "resolution started"),
            (PhaseKind::TaskPre, Some(task)) => tracing::trace!(%root, %task, "task starting"),
            (PhaseKind::TaskPost, Some(task)) => tracing::debug!(
                %root,
                %task,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "task done"
            ),
            (PhaseKind::Done, _) => tracing::info!(
                %root,
                resolved = graph.len(),
                conflicts = graph.conflicts.len(),
                "resolution finished"
            ),
            _ => {}
        }
        Ok(())
    }

    fn on_error(&self, error: &DepotError, graph: &DependencyGraph) -> Result<(), DepotError> {
        tracing::error!(root = %graph.root_node(), %error, "resolution failed");
        Ok(())
    }
}
