//! Version conflict reporting.

use std::fmt;

use serde::Serialize;

use crate::graph::DisableReason;

/// A report of all version conflicts mediated during resolution.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ConflictReport {
    pub conflicts: Vec<VersionConflict>,
}

/// One losing version of an artifact and the version that won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionConflict {
    /// Mediation key, `group:artifact[:type[:classifier]]`.
    pub key: String,
    pub requested: String,
    pub resolved: String,
    pub reason: DisableReason,
}

impl VersionConflict {
    fn explanation(&self) -> &'static str {
        match self.reason {
            DisableReason::NearerDep => "nearest wins",
            DisableReason::NearerEdge => "newest wins at equal depth",
            _ => "mediated",
        }
    }
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, conflict: VersionConflict) {
        self.conflicts.push(conflict);
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No version conflicts.");
        }
        writeln!(f, "Version conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(
                f,
                "  {} requested {} but resolved {} ({})",
                c.key,
                c.requested,
                c.resolved,
                c.explanation()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} ({})",
            self.key,
            self.requested,
            self.resolved,
            self.explanation()
        )
    }
}
