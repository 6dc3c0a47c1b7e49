//! Diagnostics as data.
//!
//! The core never logs ambiently: recoverable oddities encountered during a
//! run (a skipped archive entry, an artifact filtered out by scope) are
//! emitted through an explicit sink parameter. Callers choose what to do
//! with them; the CLI forwards to its logger, tests collect them with
//! `VecSink` and assert on the events directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One recoverable event observed during a run.
///
/// Every variant names the artifact it belongs to by its coordinate string,
/// so a sink needs no surrounding context to make sense of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An archive entry could not be read or decoded; the rest of the
    /// archive was still scanned.
    EntrySkipped {
        coordinate: String,
        entry: String,
        reason: String,
    },

    /// The artifact's scope is not in the configured allow-list.
    ScopeExcluded {
        coordinate: String,
        scope: Option<String>,
    },

    /// The artifact has no local payload (e.g. an aggregator POM).
    MissingPayload { coordinate: String },

    /// The payload exists but is not a recognized archive format.
    NotAnArchive { coordinate: String, path: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EntrySkipped {
                coordinate,
                entry,
                reason,
            } => write!(f, "{coordinate}: skipped entry {entry}: {reason}"),
            Diagnostic::ScopeExcluded { coordinate, scope } => match scope {
                Some(scope) => write!(f, "{coordinate}: scope {scope} not in allow-list"),
                None => write!(f, "{coordinate}: no scope, allow-list configured"),
            },
            Diagnostic::MissingPayload { coordinate } => {
                write!(f, "{coordinate}: no payload to scan")
            }
            Diagnostic::NotAnArchive { coordinate, path } => {
                write!(f, "{coordinate}: {path} is not a recognized archive")
            }
        }
    }
}

/// Receives diagnostics as they are produced.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collecting sink, the default for library use and tests.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<Diagnostic>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }
}

impl DiagnosticSink for VecSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.events.push(diagnostic);
    }
}
