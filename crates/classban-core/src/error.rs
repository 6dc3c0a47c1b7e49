//! Terminal outcomes of a run.
//!
//! Entry-level failures never appear here: they are absorbed at the
//! archive boundary and surfaced as diagnostics. What remains is the
//! fatal archive-open failure, which aborts the run because an incomplete
//! scan cannot certify "no violations", and the violation finding itself,
//! which is the expected failure mode of a working gate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The artifact's payload could not be opened as an archive at all.
    #[error("cannot open archive {} of {coordinate}", .path.display())]
    ArchiveOpen {
        coordinate: String,
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Banned, non-exempted references were found. Carries the full
    /// rendered report.
    #[error("{report}")]
    Violations { report: String },
}
