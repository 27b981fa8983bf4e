//! repath: rewrite relative imports after relocating modules into subfolders.
//!
//! Given a root whose flat modules were moved into subfolders, repath fixes
//! every `from "<path>"` reference so it resolves again: references that
//! leave the root get extra parent hops for the file's new depth, and
//! references to relocated modules are pointed at their new location.

// Core engine - re-exported from repath-core
pub use repath_core::config;
pub use repath_core::cross;
pub use repath_core::depth;
pub use repath_core::diff;
pub use repath_core::error;
pub use repath_core::external;
pub use repath_core::reference;
pub use repath_core::relocation;
pub use repath_core::rewrite;
pub use repath_core::rules;

// Filesystem side: collection, driver, reporting
pub mod files;
pub mod fix;
pub mod output;

// Front door
pub mod cli;
