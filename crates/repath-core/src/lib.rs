//! Core rewrite engine for repath.
//!
//! This crate is pure text and data, no filesystem walking:
//! - Depth calculation and file descriptors
//! - Relocation map and external root rules
//! - Import reference scanning
//! - External and cross-reference rewriters
//! - Configuration loading and validation
//! - Error types and exit codes
//! - Unified diff generation

pub mod config;
pub mod cross;
pub mod depth;
pub mod diff;
pub mod error;
pub mod external;
pub mod reference;
pub mod relocation;
pub mod rewrite;
pub mod rules;

pub use config::RewriteConfig;
pub use cross::CrossReferenceMode;
pub use depth::{depth_of, FileDescriptor};
pub use error::{OutputErrorCode, RepathError, RepathResult};
pub use reference::{ReferenceEdit, ReferenceKind};
pub use relocation::{RelocationEntry, RelocationMap};
pub use rewrite::{ImportRewriter, Rewrite};
pub use rules::{ExternalRootRule, ExternalRuleSet};
