//! Per-artifact archive scanning.
//!
//! One artifact in, one `ArtifactScan` out. Failure handling follows the
//! two-tier policy: anything wrong with a single entry is recovered (the
//! entry is skipped with a diagnostic and the scan continues), while a
//! payload that cannot be opened as an archive at all is fatal and
//! propagates, because a partially scanned archive cannot certify
//! anything.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read};

use sha2::{Digest, Sha256};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::artifact::ArtifactCoordinate;
use crate::classfile::{decode::decode_class, ClassName};
use crate::deps;
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::error::AuditError;
use crate::report::model::Fingerprint;
use crate::rules::{engine, RuleSet};

/// Payload extensions enumerated as zip archives. Anything else is a
/// payload the scanner has nothing to say about (POMs, test resources).
const ARCHIVE_EXTENSIONS: &[&str] = &["jar", "zip", "war", "ear"];

/// Result of scanning one artifact.
#[derive(Debug, Clone, Default)]
pub struct ArtifactScan {
    /// Sha256 of the payload bytes; `None` when nothing was read.
    pub fingerprint: Option<Fingerprint>,

    /// Class entries decoded and matched, skipped entries excluded.
    pub classes_scanned: usize,

    /// Declaring class to the banned references it makes.
    pub violations: BTreeMap<ClassName, BTreeSet<ClassName>>,
}

/// Scans one artifact's payload against the rule set.
///
/// A missing payload or a non-archive payload yields a clean empty scan
/// with a diagnostic, not an error: aggregator POMs are a normal part of
/// a resolved dependency list.
pub fn scan_artifact(
    artifact: &ArtifactCoordinate,
    rules: &RuleSet,
    sink: &mut dyn DiagnosticSink,
) -> Result<ArtifactScan, AuditError> {
    let coordinate = artifact.coordinate();

    let Some(path) = &artifact.path else {
        sink.emit(Diagnostic::MissingPayload { coordinate });
        return Ok(ArtifactScan::default());
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !ARCHIVE_EXTENSIONS.contains(&extension.as_str()) {
        sink.emit(Diagnostic::NotAnArchive {
            coordinate,
            path: path.display().to_string(),
        });
        return Ok(ArtifactScan::default());
    }

    let bytes = std::fs::read(path).map_err(|source| AuditError::ArchiveOpen {
        coordinate: coordinate.clone(),
        path: path.clone(),
        source: ZipError::Io(source),
    })?;
    let fingerprint = Fingerprint {
        algorithm: "sha256".to_string(),
        value: hex::encode(Sha256::digest(&bytes)),
    };

    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|source| AuditError::ArchiveOpen {
            coordinate: coordinate.clone(),
            path: path.clone(),
            source,
        })?;

    let mut scan = ArtifactScan {
        fingerprint: Some(fingerprint),
        ..Default::default()
    };

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(err) => {
                sink.emit(Diagnostic::EntrySkipped {
                    coordinate: coordinate.clone(),
                    entry: format!("#{index}"),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        if entry.is_dir() || !entry.name().ends_with(".class") {
            continue;
        }
        let entry_name = entry.name().to_string();

        // The entry's declared size is untrusted input; never preallocate
        // from it. The vec grows with the bytes actually read.
        let mut payload = Vec::new();
        if let Err(err) = entry.read_to_end(&mut payload) {
            sink.emit(Diagnostic::EntrySkipped {
                coordinate: coordinate.clone(),
                entry: entry_name,
                reason: err.to_string(),
            });
            continue;
        }

        let extracted = decode_class(&payload)
            .and_then(|class| deps::collect(&class).map(|deps| (class, deps)));
        let (class, dependencies) = match extracted {
            Ok(result) => result,
            Err(err) => {
                sink.emit(Diagnostic::EntrySkipped {
                    coordinate: coordinate.clone(),
                    entry: entry_name,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        scan.classes_scanned += 1;

        let hits = engine::violations(&dependencies, artifact, rules);
        if !hits.is_empty() {
            scan.violations
                .entry(ClassName::from_slashed(&class.name))
                .or_default()
                .extend(hits);
        }
    }

    Ok(scan)
}
