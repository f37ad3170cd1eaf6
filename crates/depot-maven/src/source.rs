//! Metadata sources: where the graph builder reads POMs from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use depot_core::coordinate::Coordinate;
use depot_util::errors::DepotError;

use crate::pom::{parse_pom, Pom};

/// Read access to dependency metadata.
///
/// Implementations are shared between concurrent resolutions and must be
/// reentrant.
pub trait MetadataSource: Send + Sync {
    /// The raw (not yet inherited or interpolated) POM for `coord`.
    ///
    /// Fails with [`DepotError::MetadataUnavailable`] when it cannot be read.
    fn pom(&self, coord: &Coordinate) -> Result<Pom, DepotError>;

    /// Versions known for `group:artifact`, in no particular order.
    fn versions(&self, _group: &str, _artifact: &str) -> Result<Vec<String>, DepotError> {
        Ok(Vec::new())
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for std::sync::Arc<S> {
    fn pom(&self, coord: &Coordinate) -> Result<Pom, DepotError> {
        (**self).pom(coord)
    }

    fn versions(&self, group: &str, artifact: &str) -> Result<Vec<String>, DepotError> {
        (**self).versions(group, artifact)
    }
}

/// Standard Maven layout path for a given coordinate.
///
/// `org.slf4j:slf4j-api:2.0.9` becomes `org/slf4j/slf4j-api/2.0.9`
pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
    format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
}

/// A repository on local disk laid out like `~/.m2/repository`.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the files of one artifact version.
    pub fn artifact_dir(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        self.root.join(coordinate_path(group, artifact, version))
    }

    pub fn pom_path(&self, coord: &Coordinate) -> PathBuf {
        self.artifact_dir(&coord.group_id, &coord.artifact_id, &coord.version)
            .join(format!("{}-{}.pom", coord.artifact_id, coord.version))
    }

    /// Write a POM into the repository layout.
    pub fn put_pom(&self, coord: &Coordinate, xml: &str) -> Result<PathBuf, DepotError> {
        let path = self.pom_path(coord);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&path, xml)?;
        Ok(path)
    }
}

impl MetadataSource for LocalRepository {
    fn pom(&self, coord: &Coordinate) -> Result<Pom, DepotError> {
        let path = self.pom_path(coord);
        let xml = std::fs::read_to_string(&path).map_err(|e| {
            DepotError::metadata(coord, format!("cannot read {}: {e}", path.display()))
        })?;
        tracing::trace!(path = %path.display(), "read POM");
        parse_pom(&xml).map_err(|e| DepotError::metadata(coord, e.to_string()))
    }

    fn versions(&self, group: &str, artifact: &str) -> Result<Vec<String>, DepotError> {
        let dir = self.root.join(group.replace('.', "/")).join(artifact);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut versions = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                versions.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        Ok(versions)
    }
}

/// POMs held in memory, keyed by `group:artifact:version`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    poms: HashMap<String, Pom>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and store a POM under the coordinate it declares.
    pub fn insert(&mut self, xml: &str) -> Result<Coordinate, DepotError> {
        let pom = parse_pom(xml)?;
        let coord = pom.coordinate().ok_or_else(|| DepotError::Pom {
            message: "POM does not declare groupId, artifactId and version".to_string(),
        })?;
        self.poms.insert(Self::key(&coord.group_id, &coord.artifact_id, &coord.version), pom);
        Ok(coord)
    }

    /// Builder-style [`MemorySource::insert`] for tests and fixtures.
    pub fn with_pom(mut self, xml: &str) -> Result<Self, DepotError> {
        self.insert(xml)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.poms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poms.is_empty()
    }

    fn key(group: &str, artifact: &str, version: &str) -> String {
        format!("{group}:{artifact}:{version}")
    }
}

impl MetadataSource for MemorySource {
    fn pom(&self, coord: &Coordinate) -> Result<Pom, DepotError> {
        self.poms
            .get(&Self::key(&coord.group_id, &coord.artifact_id, &coord.version))
            .cloned()
            .ok_or_else(|| DepotError::metadata(coord, "POM not found"))
    }

    fn versions(&self, group: &str, artifact: &str) -> Result<Vec<String>, DepotError> {
        Ok(self
            .poms
            .values()
            .filter_map(|p| p.coordinate())
            .filter(|c| c.group_id == group && c.artifact_id == artifact)
            .map(|c| c.version)
            .collect())
    }
}
