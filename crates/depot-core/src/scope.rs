//! Dependency scopes, transitive propagation, and visibility.

use std::fmt;
use std::str::FromStr;

use depot_util::errors::DepotError;
use serde::{Deserialize, Serialize};

/// Maven-compatible dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Compile,
    Runtime,
    Test,
    Provided,
    System,
}

impl Default for Scope {
    fn default() -> Self {
        Self::Compile
    }
}

impl Scope {
    pub const ALL: [Scope; 5] = [
        Scope::Compile,
        Scope::Runtime,
        Scope::Test,
        Scope::Provided,
        Scope::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::Provided => "provided",
            Self::System => "system",
        }
    }

    /// Effective scope of a dependency declared with `child` scope by an
    /// artifact that is itself in `parent` scope.
    ///
    /// `None` means the dependency is not transitive: test, provided and
    /// system dependencies of a dependency never reach the consumer.
    pub fn combine(parent: Scope, child: Scope) -> Option<Scope> {
        match child {
            Scope::Test | Scope::Provided | Scope::System => None,
            Scope::Compile => Some(parent),
            Scope::Runtime => Some(match parent {
                Scope::Compile => Scope::Runtime,
                other => other,
            }),
        }
    }

    /// Whether a dependency in `effective` scope belongs to a resolution for
    /// `self`.
    pub fn includes(&self, effective: Scope) -> bool {
        match self {
            Scope::Compile => matches!(
                effective,
                Scope::Compile | Scope::Provided | Scope::System
            ),
            Scope::Runtime => matches!(effective, Scope::Compile | Scope::Runtime),
            Scope::Test => true,
            Scope::Provided => effective == Scope::Provided,
            Scope::System => effective == Scope::System,
        }
    }

    /// Relative strength used when one artifact is reached in several scopes.
    fn rank(&self) -> u8 {
        match self {
            Scope::Compile => 4,
            Scope::Runtime => 3,
            Scope::Provided => 2,
            Scope::System => 1,
            Scope::Test => 0,
        }
    }

    /// The stronger of two scopes.
    pub fn widest(a: Scope, b: Scope) -> Scope {
        if b.rank() > a.rank() {
            b
        } else {
            a
        }
    }
}

impl FromStr for Scope {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "runtime" => Ok(Self::Runtime),
            "test" => Ok(Self::Test),
            "provided" => Ok(Self::Provided),
            "system" => Ok(Self::System),
            _ => Err(DepotError::Scope {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
