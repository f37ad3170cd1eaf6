//! Per-build caches: effective POMs and expanded coordinates.

use std::collections::{HashMap, HashSet};

use depot_core::coordinate::Coordinate;
use depot_maven::pom::Pom;

fn pom_key(coord: &Coordinate) -> String {
    format!("{}:{}:{}", coord.group_id, coord.artifact_id, coord.version)
}

/// Effective POMs (parents applied, properties resolved, BOMs imported),
/// keyed by `group:artifact:version`. Type and classifier share one POM.
#[derive(Debug, Default)]
pub struct PomCache {
    poms: HashMap<String, Pom>,
}

impl PomCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: &Coordinate) -> Option<&Pom> {
        self.poms.get(&pom_key(coord))
    }

    pub fn insert(&mut self, coord: &Coordinate, pom: Pom) {
        self.poms.insert(pom_key(coord), pom);
    }

    pub fn len(&self) -> usize {
        self.poms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poms.is_empty()
    }
}

/// Tracks which coordinates have had their dependencies expanded, so each
/// is expanded at most once.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a coordinate as visited. Returns `false` if already visited.
    pub fn visit(&mut self, coord: &Coordinate) -> bool {
        self.visited.insert(coord.key())
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.visited.contains(&coord.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_tracking() {
        let mut set = VisitedSet::new();
        let lib = Coordinate::new("org.example", "lib", "1.0");
        assert!(set.visit(&lib));
        assert!(!set.visit(&lib));
        assert!(set.contains(&lib));
        assert!(!set.contains(&lib.with_version("2.0")));
        assert!(!set.contains(&lib.clone().with_classifier("sources")));
    }

    #[test]
    fn pom_cache_ignores_type() {
        let mut cache = PomCache::new();
        let lib = Coordinate::new("org.example", "lib", "1.0");
        cache.insert(&lib, Pom::default());
        assert!(cache.get(&lib.clone().with_type("pom")).is_some());
        assert!(cache.get(&lib.with_version("2.0")).is_none());
        assert_eq!(cache.len(), 1);
    }
}
