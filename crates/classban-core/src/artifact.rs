//! Resolved-artifact manifest.
//!
//! The resolver collaborator hands the core a complete, deduplicated
//! artifact list before scanning starts; this module is its JSON contract.
//! The core never resolves or fetches anything itself.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One resolved artifact: coordinates, scope, and an optional local
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ArtifactCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,

    #[serde(default)]
    pub classifier: Option<String>,

    /// Packaging type, `jar` unless stated otherwise.
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub scope: Option<String>,

    /// Local payload path. `None` for payload-less artifacts such as
    /// aggregator POMs.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_kind() -> String {
    "jar".to_string()
}

impl ArtifactCoordinate {
    /// Coordinate string in the conventional
    /// `group:artifact:type[:classifier]:version` order.
    pub fn coordinate(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}:{}:{}:{classifier}:{}",
                self.group_id, self.artifact_id, self.kind, self.version
            ),
            None => format!(
                "{}:{}:{}:{}",
                self.group_id, self.artifact_id, self.kind, self.version
            ),
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinate())
    }
}

/// The resolver's output, consumed whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub artifacts: Vec<ArtifactCoordinate>,
}

impl Manifest {
    /// Loads a manifest from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses a manifest from a JSON string.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|e| ManifestError::Parse {
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {message}")]
    Parse { message: String },
}
