//! Error types and error code constants for repath.
//!
//! This module provides a unified error type (`RepathError`) covering
//! configuration validation, relocation map construction and file I/O, plus
//! the mapping from each error to a stable process exit code.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments or configuration (bad input from caller)
//! - `3`: Resolution errors (root missing, file unreadable)
//! - `4`: Apply errors (failed to write a rewritten file)
//! - `10`: Internal errors (bugs, unexpected state)

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for CLI exit status and JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments or configuration from caller.
    InvalidArguments = 2,
    /// Resolution errors (root not found, unreadable file).
    ResolutionError = 3,
    /// Apply errors (failed to write changes).
    ApplyError = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for the rewrite engine and its CLI.
#[derive(Debug, Error)]
pub enum RepathError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Configuration could not be parsed or failed validation.
    #[error("invalid config{}: {message}", source_suffix(.path))]
    InvalidConfig {
        path: Option<PathBuf>,
        message: String,
    },

    /// The same identifier was relocated twice.
    #[error("duplicate relocation for identifier '{identifier}': '{first}' and '{second}'")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    /// A relocation entry is malformed.
    #[error("invalid relocation '{identifier}' -> '{path}': {reason}")]
    InvalidRelocation {
        identifier: String,
        path: String,
        reason: String,
    },

    /// An external root rule is malformed or collides with another.
    #[error("invalid external root rule '{name}': {reason}")]
    InvalidRule { name: String, reason: String },

    /// The reorganized root does not exist or is not a directory.
    #[error("root not found: {}", .path.display())]
    RootNotFound { path: PathBuf },

    /// A source file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A rewritten file could not be written back.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

fn source_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" {}", p.display()),
        None => String::new(),
    }
}

/// Result type for repath operations.
pub type RepathResult<T> = Result<T, RepathError>;

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&RepathError> for OutputErrorCode {
    fn from(err: &RepathError) -> Self {
        match err {
            RepathError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            RepathError::InvalidConfig { .. } => OutputErrorCode::InvalidArguments,
            RepathError::DuplicateIdentifier { .. } => OutputErrorCode::InvalidArguments,
            RepathError::InvalidRelocation { .. } => OutputErrorCode::InvalidArguments,
            RepathError::InvalidRule { .. } => OutputErrorCode::InvalidArguments,
            RepathError::RootNotFound { .. } => OutputErrorCode::ResolutionError,
            RepathError::Read { .. } => OutputErrorCode::ResolutionError,
            RepathError::Write { .. } => OutputErrorCode::ApplyError,
            RepathError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<RepathError> for OutputErrorCode {
    fn from(err: RepathError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl RepathError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        RepathError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a config error not tied to a file.
    pub fn config(message: impl Into<String>) -> Self {
        RepathError::InvalidConfig {
            path: None,
            message: message.into(),
        }
    }

    /// Create a config error for a specific config file.
    pub fn config_at(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RepathError::InvalidConfig {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    /// Create an invalid relocation error.
    pub fn invalid_relocation(
        identifier: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RepathError::InvalidRelocation {
            identifier: identifier.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid rule error.
    pub fn invalid_rule(name: impl Into<String>, reason: impl Into<String>) -> Self {
        RepathError::InvalidRule {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RepathError::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RepathError::Write {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        RepathError::InternalError {
            message: message.into(),
        }
    }

    /// Stable error code name for JSON output.
    pub fn code_name(&self) -> &'static str {
        match self {
            RepathError::InvalidArguments { .. } => "InvalidArguments",
            RepathError::InvalidConfig { .. } => "InvalidConfig",
            RepathError::DuplicateIdentifier { .. } => "DuplicateIdentifier",
            RepathError::InvalidRelocation { .. } => "InvalidRelocation",
            RepathError::InvalidRule { .. } => "InvalidRule",
            RepathError::RootNotFound { .. } => "RootNotFound",
            RepathError::Read { .. } => "ReadError",
            RepathError::Write { .. } => "WriteError",
            RepathError::InternalError { .. } => "InternalError",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
