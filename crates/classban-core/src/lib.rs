pub mod artifact;
pub mod classfile;
pub mod config;
pub mod deps;
pub mod diag;
pub mod error;
pub mod report;
pub mod rules;
pub mod scan;

pub const TOOL_NAME: &str = "classban";

/// JSON schema version of classban reports.
/// This must be bumped only when the report contract changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";
