//! The audit report: the stable JSON contract of a run.
//!
//! Identical inputs must produce byte-identical reports. Violation rows
//! are keyed by declaring class and sorted; artifact entries follow the
//! manifest order the resolver supplied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diag::Diagnostic;
use crate::error::AuditError;
use crate::report::render;
use crate::SCHEMA_VERSION;

/// Top-level report of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub rules: RuleSummary,

    /// One entry per scanned artifact, in manifest order. Scope-excluded
    /// artifacts contribute no entry, only a diagnostic.
    pub artifacts: Vec<ArtifactReport>,

    pub diagnostics: Vec<Diagnostic>,
    pub outcome: Outcome,
    pub exit_code: i32,
}

impl AuditReport {
    /// Assembles a report from pipeline outputs, deriving the outcome.
    pub fn new(
        tool: ToolInfo,
        rules: RuleSummary,
        artifacts: Vec<ArtifactReport>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let violations = artifacts.iter().any(|a| !a.violations.is_empty());
        let (outcome, exit_code) = if violations {
            (Outcome::Violations, 1)
        } else {
            (Outcome::Clean, 0)
        };
        AuditReport {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            rules,
            artifacts,
            diagnostics,
            outcome,
            exit_code,
        }
    }

    pub fn has_violations(&self) -> bool {
        self.outcome == Outcome::Violations
    }

    /// Turns a violating report into the run's terminal error, carrying
    /// the full rendered payload. A clean report passes through.
    pub fn require_clean(&self) -> Result<(), AuditError> {
        if self.has_violations() {
            Err(AuditError::Violations {
                report: render::render_text(self),
            })
        } else {
            Ok(())
        }
    }
}

/// Tool metadata stamped into every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub commit: Option<String>,
}

/// Shape of the rule set the run was evaluated against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSummary {
    pub ban_rules: usize,
    pub ignore_rules: usize,
    pub scopes: Option<Vec<String>>,
}

/// Per-artifact scan outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactReport {
    pub coordinate: String,

    /// Payload fingerprint; `None` for payload-less artifacts.
    pub fingerprint: Option<Fingerprint>,

    pub classes_scanned: usize,

    /// Declaring class (dotted) to its banned references (dotted, sorted).
    pub violations: BTreeMap<String, Vec<String>>,
}

/// Cryptographic payload fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub algorithm: String,
    pub value: String,
}

/// Final run outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Clean,
    Violations,
}
