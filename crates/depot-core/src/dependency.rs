use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinate::MediationKey;
use crate::scope::Scope;

/// Wildcard accepted in either part of an exclusion.
pub const WILDCARD: &str = "*";

/// A transitive dependency to exclude, as `group:artifact`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

impl Exclusion {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Parse `group:artifact` or a bare `group` (all of its artifacts).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        match s.split_once(':') {
            Some((g, a)) if !g.is_empty() && !a.is_empty() && !a.contains(':') => {
                Some(Self::new(g, a))
            }
            Some(_) => None,
            None => Some(Self::new(s, WILDCARD)),
        }
    }

    pub fn matches(&self, key: &MediationKey) -> bool {
        (self.group_id == WILDCARD || self.group_id == key.group_id)
            && (self.artifact_id == WILDCARD || self.artifact_id == key.artifact_id)
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A dependency-management entry: version and scope overrides for one
/// mediation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedDependency {
    pub key: MediationKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

/// Union `from` into `into` by key. Entries already in `into` win.
pub fn merge_managed(into: &mut Vec<ManagedDependency>, from: &[ManagedDependency]) {
    for entry in from {
        if !into.iter().any(|e| e.key == entry.key) {
            into.push(entry.clone());
        }
    }
}

/// Look up the entry managing `key`.
pub fn find_managed<'a>(
    managed: &'a [ManagedDependency],
    key: &MediationKey,
) -> Option<&'a ManagedDependency> {
    managed.iter().find(|e| &e.key == key)
}
