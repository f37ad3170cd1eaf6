use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use depot_util::errors::DepotError;
use depot_util::fs::{expand_home, find_ancestor_with, home_dir};

use crate::scope::Scope;

/// File name of a project-local configuration.
pub const CONFIG_FILE: &str = "depot.toml";

/// Resolver configuration loaded from `depot.toml` or `~/.depot/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepotConfig {
    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

/// Resolution settings from `[resolve]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Desired top-level scope of a resolution.
    #[serde(default = "default_scope")]
    pub scope: Scope,
    /// Keep optional dependencies of dependencies.
    #[serde(default, rename = "include-optional")]
    pub include_optional: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            scope: default_scope(),
            include_optional: false,
        }
    }
}

fn default_scope() -> Scope {
    Scope::Test
}

/// Repository settings from `[repository]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_local_repository")]
    pub local: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            local: default_local_repository(),
        }
    }
}

fn default_local_repository() -> String {
    "~/.m2/repository".to_string()
}

impl DepotConfig {
    /// Load the nearest `depot.toml` above `start`, then the global config,
    /// or return defaults if neither exists.
    pub fn load(start: &Path) -> Result<Self, DepotError> {
        if let Some(dir) = find_ancestor_with(start, CONFIG_FILE) {
            return Self::from_path(&dir.join(CONFIG_FILE));
        }
        let global = Self::default_path();
        if global.is_file() {
            Self::from_path(&global)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, DepotError> {
        let content = std::fs::read_to_string(path).map_err(|e| DepotError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let config = Self::parse_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse_toml(content: &str) -> Result<Self, DepotError> {
        toml::from_str(content).map_err(|e| DepotError::Config {
            message: format!("Failed to parse configuration: {e}"),
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// The local repository root with `~` expanded.
    pub fn repository_path(&self) -> PathBuf {
        expand_home(&self.repository.local)
    }
}

/// Returns the path to the depot data directory (`~/.depot/`).
pub fn dirs_path() -> PathBuf {
    home_dir().join(".depot")
}
