//! Report types and rendering for CLI output.
//!
//! Text output is the progress log: one line per modified file and a final
//! total. JSON output serializes the same report for scripting.
//!
//! JSON responses follow two rules:
//! 1. **Status first:** every response has `status` as its first field
//! 2. **Deterministic:** files appear in walk order

use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use repath_core::error::{OutputErrorCode, RepathError};
use repath_core::reference::ReferenceEdit;

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

/// One modified (or would-be-modified) file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFile {
    /// Path relative to the root.
    pub path: String,
    pub edits: Vec<ReferenceEdit>,
}

/// Result of a fix run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixReport {
    pub status: String,
    pub schema_version: String,
    pub dry_run: bool,
    pub root: String,
    pub files: Vec<FixedFile>,
    pub total_fixed: usize,
}

impl FixReport {
    pub fn new(root: &Path, dry_run: bool, files: Vec<FixedFile>, total_fixed: usize) -> Self {
        FixReport {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            dry_run,
            root: root.display().to_string(),
            files,
            total_fixed,
        }
    }
}

/// Error information for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code (also the process exit code).
    pub code: u8,
    /// Stable error name.
    pub kind: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn from_error(err: &RepathError) -> Self {
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            kind: err.code_name().to_string(),
            message: err.to_string(),
        }
    }
}

/// Error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub schema_version: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn new(err: &RepathError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Progress line for one modified file.
pub fn progress_line(relative_path: &str, dry_run: bool) -> String {
    if dry_run {
        format!("Would fix: {}", relative_path)
    } else {
        format!("Fixed: {}", relative_path)
    }
}

/// Final summary line.
pub fn summary_line(total: usize, dry_run: bool) -> String {
    if dry_run {
        format!("Total files to fix: {}", total)
    } else {
        format!("Total files fixed: {}", total)
    }
}

/// Write the text summary (blank line, then the total).
pub fn emit_summary(report: &FixReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", summary_line(report.total_fixed, report.dry_run))
}

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================
