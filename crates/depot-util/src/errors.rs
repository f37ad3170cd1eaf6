use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depot operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepotError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dependency metadata (a POM) could not be read for a coordinate.
    #[error("Metadata unavailable for {coordinate}: {reason}")]
    #[diagnostic(
        code(depot::metadata_unavailable),
        help("Check that the artifact's POM exists in the configured repository")
    )]
    MetadataUnavailable { coordinate: String, reason: String },

    /// Malformed POM XML.
    #[error("Invalid POM: {message}")]
    Pom { message: String },

    /// A coordinate string that does not follow `group:artifact[:type[:classifier]]:version`.
    #[error("Invalid coordinate '{input}': expected group:artifact[:type[:classifier]]:version")]
    Coordinate { input: String },

    /// A scope name outside the recognized set.
    #[error("Unknown scope '{input}': expected one of compile, runtime, test, provided, system")]
    Scope { input: String },

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check depot.toml or ~/.depot/config.toml"))]
    Config { message: String },

    /// A graph task failed; the pipeline stopped at `task`.
    #[error("Graph task '{task}' failed: {source}")]
    #[diagnostic(code(depot::graph_task))]
    GraphTask {
        task: String,
        #[source]
        source: Box<DepotError>,
    },

    /// A graph listener rejected an event.
    #[error("Graph listener failed: {message}")]
    Listener { message: String },

    /// Dependency resolution failed for a reason other than missing metadata.
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl DepotError {
    /// Shorthand for [`DepotError::MetadataUnavailable`].
    pub fn metadata(coordinate: impl ToString, reason: impl Into<String>) -> Self {
        Self::MetadataUnavailable {
            coordinate: coordinate.to_string(),
            reason: reason.into(),
        }
    }

    /// The innermost error, looking through [`DepotError::GraphTask`] wrappers.
    pub fn root_cause(&self) -> &DepotError {
        match self {
            Self::GraphTask { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
