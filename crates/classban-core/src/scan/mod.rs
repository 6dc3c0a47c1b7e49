//! The run orchestrator.
//!
//! Walks the resolved artifact list once, sequentially: scope filter,
//! archive scan, aggregation into the final report. Per-artifact scanning
//! is a pure function of (payload, rule set), so ordering never affects
//! which violations are found, only the report keeps the manifest's
//! artifact order.

pub mod archive;

pub use archive::{scan_artifact, ArtifactScan};

use std::collections::BTreeSet;

use crate::artifact::ArtifactCoordinate;
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::error::AuditError;
use crate::report::model::{ArtifactReport, AuditReport, RuleSummary, ToolInfo};
use crate::rules::RuleSet;

/// Runs the whole audit over a resolved artifact list.
///
/// Returns the report for both outcomes; only a fatal archive-open
/// failure is an `Err`. Callers that want violations surfaced as the
/// run's terminal error chain
/// [`AuditReport::require_clean`](crate::report::model::AuditReport::require_clean).
///
/// Every diagnostic is both forwarded to `sink` and recorded in the
/// report.
pub fn run(
    artifacts: &[ArtifactCoordinate],
    rules: &RuleSet,
    scopes: Option<&BTreeSet<String>>,
    tool: ToolInfo,
    sink: &mut dyn DiagnosticSink,
) -> Result<AuditReport, AuditError> {
    let mut recording = Recording {
        inner: sink,
        seen: Vec::new(),
    };

    let mut entries = Vec::new();
    for artifact in artifacts {
        if let Some(allow) = scopes {
            let in_scope = artifact
                .scope
                .as_deref()
                .is_some_and(|scope| allow.contains(scope));
            if !in_scope {
                recording.emit(Diagnostic::ScopeExcluded {
                    coordinate: artifact.coordinate(),
                    scope: artifact.scope.clone(),
                });
                continue;
            }
        }

        let scan = scan_artifact(artifact, rules, &mut recording)?;
        entries.push(ArtifactReport {
            coordinate: artifact.coordinate(),
            fingerprint: scan.fingerprint,
            classes_scanned: scan.classes_scanned,
            violations: scan
                .violations
                .into_iter()
                .map(|(declaring, banned)| {
                    (
                        declaring.dotted(),
                        banned.iter().map(|name| name.dotted()).collect(),
                    )
                })
                .collect(),
        });
    }

    let summary = RuleSummary {
        ban_rules: rules.ban_count(),
        ignore_rules: rules.ignore_count(),
        scopes: scopes.map(|s| s.iter().cloned().collect()),
    };
    Ok(AuditReport::new(tool, summary, entries, recording.seen))
}

/// Tees diagnostics: forwards each event to the caller's sink and keeps a
/// copy for the report.
struct Recording<'a> {
    inner: &'a mut dyn DiagnosticSink,
    seen: Vec<Diagnostic>,
}

impl DiagnosticSink for Recording<'_> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.seen.push(diagnostic.clone());
        self.inner.emit(diagnostic);
    }
}
