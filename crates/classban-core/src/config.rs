//! Rule configuration file.
//!
//! The TOML surface the user writes:
//!
//! ```toml
//! banned = ["org.slf4j.*", "com.sun.misc.Unsafe"]
//! scopes = ["compile", "runtime"]          # optional allow-list
//!
//! [[ignore]]
//! group-id = "commons-io"                  # each coordinate field optional
//! classes  = ["org.apache.commons.io.*"]   # required, non-empty
//! ```
//!
//! Parsing is plain serde; `parse` additionally validates what the schema
//! cannot express. Pattern compilation happens later, in
//! [`crate::rules::RuleSet::compile`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level audit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AuditConfig {
    /// Banned class names, literal or trailing-`*` prefix wildcard,
    /// in declaration order. Empty is legal: no rule ever fires.
    #[serde(default)]
    pub banned: Vec<String>,

    /// Scope allow-list. Absent means every artifact is scanned.
    #[serde(default)]
    pub scopes: Option<BTreeSet<String>>,

    /// Exceptions to the ban list.
    #[serde(default)]
    pub ignore: Vec<IgnoreEntry>,
}

/// One `[[ignore]]` entry: coordinate matchers plus exempted classes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct IgnoreEntry {
    /// Wildcard over the artifact's group id. Absent matches everything,
    /// as do the other coordinate fields.
    #[serde(default)]
    pub group_id: Option<String>,

    #[serde(default)]
    pub artifact_id: Option<String>,

    #[serde(default)]
    pub classifier: Option<String>,

    /// Wildcard over the artifact's packaging type (`jar`, `war`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Class wildcards to exempt, in dotted form.
    pub classes: Vec<String>,
}

impl AuditConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: AuditConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        for (index, entry) in config.ignore.iter().enumerate() {
            if entry.classes.is_empty() {
                return Err(ConfigError::EmptyIgnore { index });
            }
        }
        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {message}")]
    Parse { message: String },

    #[error("ignore entry {index} lists no classes")]
    EmptyIgnore { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = AuditConfig::parse(
            r#"
            banned = ["org.slf4j.*", "com.sun.misc.Unsafe"]
            scopes = ["compile", "runtime"]

            [[ignore]]
            group-id = "commons-io"
            classes = ["org.apache.commons.io.*"]

            [[ignore]]
            artifact-id = "legacy-?"
            type = "war"
            classes = ["com.legacy.*", "com.old.Api"]
            "#,
        )
        .unwrap();

        assert_eq!(config.banned.len(), 2);
        assert_eq!(config.banned[0], "org.slf4j.*");
        let scopes = config.scopes.unwrap();
        assert!(scopes.contains("compile") && scopes.contains("runtime"));
        assert_eq!(config.ignore.len(), 2);
        assert_eq!(config.ignore[0].group_id.as_deref(), Some("commons-io"));
        assert!(config.ignore[0].artifact_id.is_none());
        assert_eq!(config.ignore[1].kind.as_deref(), Some("war"));
        assert_eq!(config.ignore[1].classes.len(), 2);
    }

    #[test]
    fn empty_config_is_legal() {
        let config = AuditConfig::parse("").unwrap();
        assert!(config.banned.is_empty());
        assert!(config.scopes.is_none());
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn ignore_entry_without_classes_is_rejected() {
        let result = AuditConfig::parse(
            r#"
            [[ignore]]
            group-id = "commons-io"
            classes = []
            "#,
        );
        assert!(matches!(result, Err(ConfigError::EmptyIgnore { index: 0 })));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            AuditConfig::parse("band = [\"typo\"]"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = AuditConfig::from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
