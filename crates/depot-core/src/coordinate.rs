use std::fmt;

use depot_util::errors::DepotError;
use serde::{Deserialize, Serialize};

/// Default artifact type when none is declared.
pub const DEFAULT_TYPE: &str = "jar";

/// Maven coordinates identifying one artifact.
///
/// Equality and hashing cover all five fields. Use [`Coordinate::mediation_key`]
/// to compare artifacts independently of their version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    pub type_: String,
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

impl Coordinate {
    /// A `jar` coordinate without a classifier.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            type_: default_type(),
        }
    }

    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = type_.into();
        self
    }

    /// Set the classifier; an empty string clears it.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        let classifier = classifier.into();
        self.classifier = if classifier.is_empty() {
            None
        } else {
            Some(classifier)
        };
        self
    }

    /// Same artifact at another version.
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }

    /// Parse `group:artifact:version`, `group:artifact:type:version` or
    /// `group:artifact:type:classifier:version`.
    pub fn parse(s: &str) -> Result<Self, DepotError> {
        let invalid = || DepotError::Coordinate {
            input: s.to_string(),
        };
        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }
        match parts.as_slice() {
            [g, a, v] => Ok(Self::new(*g, *a, *v)),
            [g, a, t, v] => Ok(Self::new(*g, *a, *v).with_type(*t)),
            [g, a, t, c, v] => Ok(Self::new(*g, *a, *v).with_type(*t).with_classifier(*c)),
            _ => Err(invalid()),
        }
    }

    /// Normalized identity key `group:artifact:type:classifier:version`.
    pub fn key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.type_,
            self.classifier.as_deref().unwrap_or(""),
            self.version
        )
    }

    /// The coordinate without its version.
    pub fn mediation_key(&self) -> MediationKey {
        MediationKey {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            type_: self.type_.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.group_id, self.artifact_id)?;
        match &self.classifier {
            Some(c) => write!(f, "{}:{}:", self.type_, c)?,
            None if self.type_ != DEFAULT_TYPE => write!(f, "{}:", self.type_)?,
            None => {}
        }
        f.write_str(&self.version)
    }
}

/// Version-less identity of an artifact: "the same dependency at possibly
/// different versions". Conflict mediation keeps one node per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MediationKey {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl MediationKey {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        type_: Option<&str>,
        classifier: Option<&str>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            type_: type_.unwrap_or(DEFAULT_TYPE).to_string(),
            classifier: classifier.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }
}

impl fmt::Display for MediationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        match &self.classifier {
            Some(c) => write!(f, ":{}:{}", self.type_, c),
            None if self.type_ != DEFAULT_TYPE => write!(f, ":{}", self.type_),
            None => Ok(()),
        }
    }
}
