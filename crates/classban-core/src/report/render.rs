//! Human-readable rendering of the failure payload.
//!
//! A clean run renders to the empty string: the text mode of a passing
//! gate prints nothing. Only offending artifacts appear, each with one
//! indented row per declaring class and its banned references.

use crate::report::model::AuditReport;

pub fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();
    for artifact in report.artifacts.iter().filter(|a| !a.violations.is_empty()) {
        if out.is_empty() {
            out.push_str("Banned classes found:\n");
        }
        out.push_str(&format!("\n  in {}\n", artifact.coordinate));
        for (declaring, banned) in &artifact.violations {
            out.push_str(&format!("    {declaring}\n"));
            for name in banned {
                out.push_str(&format!("      {name}\n"));
            }
        }
    }
    out
}
