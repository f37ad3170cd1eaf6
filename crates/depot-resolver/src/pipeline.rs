//! The ordered sequence of graph tasks that turns a request into a resolved
//! graph, with listener notification around each step.

use std::fmt;
use std::sync::Arc;

use depot_core::scope::Scope;
use depot_util::errors::DepotError;

use crate::builder::GraphBuilder;
use crate::graph::DependencyGraph;
use crate::listener::{GraphListener, PhaseKind};
use crate::tasks;

/// One step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Populate,
    FlagCyclicEdges,
    FlagExcludedEdges,
    ReduceEnabledEdges,
    RefineConflicts,
    ReduceScope,
    ReduceTransitiveEdges,
    UpdateScopes,
}

impl TaskKind {
    /// Execution order. Cycle flagging runs again after conflict mediation,
    /// since mediation can leave a winner that closes a new cycle.
    pub const PIPELINE: [TaskKind; 9] = [
        TaskKind::Populate,
        TaskKind::FlagCyclicEdges,
        TaskKind::FlagExcludedEdges,
        TaskKind::ReduceEnabledEdges,
        TaskKind::RefineConflicts,
        TaskKind::FlagCyclicEdges,
        TaskKind::ReduceScope,
        TaskKind::ReduceTransitiveEdges,
        TaskKind::UpdateScopes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Populate => "populate",
            Self::FlagCyclicEdges => "flag-cyclic-edges",
            Self::FlagExcludedEdges => "flag-excluded-edges",
            Self::ReduceEnabledEdges => "reduce-enabled-edges",
            Self::RefineConflicts => "refine-conflicts",
            Self::ReduceScope => "reduce-scope",
            Self::ReduceTransitiveEdges => "reduce-transitive-edges",
            Self::UpdateScopes => "update-scopes",
        }
    }

    /// Whether the graph may contain enabled cycles after this task.
    pub fn produces_cycles(&self) -> bool {
        matches!(self, Self::Populate | Self::RefineConflicts)
    }

    /// Run this task; returns how many nodes or edges it changed.
    pub fn run(&self, graph: &mut DependencyGraph, ctx: &TaskContext<'_>) -> Result<usize, DepotError> {
        let changed = match self {
            Self::Populate => tasks::populate(graph, ctx.builder)?,
            Self::FlagCyclicEdges => tasks::flag_cyclic_edges(graph),
            Self::FlagExcludedEdges => tasks::flag_excluded_edges(graph),
            Self::ReduceEnabledEdges => tasks::reduce_enabled_edges(graph),
            Self::RefineConflicts => tasks::refine_conflicts(graph, ctx.include_optional),
            Self::ReduceScope => tasks::reduce_scope(graph, ctx.scope, ctx.include_optional),
            Self::ReduceTransitiveEdges => tasks::reduce_transitive_edges(graph),
            Self::UpdateScopes => tasks::update_scopes(graph),
        };
        Ok(changed)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a task may read besides the graph.
pub struct TaskContext<'a> {
    pub builder: &'a dyn GraphBuilder,
    pub scope: Scope,
    pub include_optional: bool,
}

/// Runs [`TaskKind::PIPELINE`] over a graph, notifying listeners.
#[derive(Default, Clone)]
pub struct TaskPipeline {
    listeners: Vec<Arc<dyn GraphListener>>,
}

impl TaskPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn GraphListener>) {
        self.listeners.push(listener);
    }

    fn notify(
        &self,
        phase: PhaseKind,
        task: Option<TaskKind>,
        graph: &DependencyGraph,
    ) -> Result<(), DepotError> {
        for listener in &self.listeners {
            listener.on_phase(phase, task, graph)?;
        }
        Ok(())
    }

    /// Run every task in order. A failing task stops the pipeline; its error
    /// is wrapped with the task name, handed to every listener, and
    /// returned.
    pub fn run(&self, graph: &mut DependencyGraph, ctx: &TaskContext<'_>) -> Result<(), DepotError> {
        self.notify(PhaseKind::New, None, graph)?;

        for task in TaskKind::PIPELINE {
            self.notify(PhaseKind::TaskPre, Some(task), graph)?;
            match task.run(graph, ctx) {
                Ok(changed) => {
                    tracing::trace!(%task, changed, "task finished");
                }
                Err(source) => {
                    let error = DepotError::GraphTask {
                        task: task.name().to_string(),
                        source: Box::new(source),
                    };
                    for listener in &self.listeners {
                        listener.on_error(&error, graph)?;
                    }
                    return Err(error);
                }
            }
            self.notify(PhaseKind::TaskPost, Some(task), graph)?;
        }

        self.notify(PhaseKind::Done, None, graph)
    }
}

impl fmt::Debug for TaskPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskPipeline")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order() {
        let names: Vec<&str> = TaskKind::PIPELINE.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "populate",
                "flag-cyclic-edges",
                "flag-excluded-edges",
                "reduce-enabled-edges",
                "refine-conflicts",
                "flag-cyclic-edges",
                "reduce-scope",
                "reduce-transitive-edges",
                "update-scopes",
            ]
        );
    }

    #[test]
    fn cycle_producers_are_followed_by_cycle_flagging() {
        let order = TaskKind::PIPELINE;
        for (i, task) in order.iter().enumerate() {
            if task.produces_cycles() {
                assert_eq!(order[i + 1], TaskKind::FlagCyclicEdges, "after {task}");
            }
        }
    }
}
