//! CLI helpers for repath operations.
//!
//! Provides the command implementations behind the `repath` binary:
//! - `fix` - rewrite imports under the root (or preview with a dry run)
//! - `check` - report files that still need rewriting
//! - `config` - print the resolved configuration
//!
//! ## Config Resolution
//!
//! 1. `--config <file>` if given
//! 2. `repath.toml` in the working directory if present
//! 3. the built-in simulation systems preset
//!
//! A `--root` override wins over the root from any of these. Relative roots
//! from the preset or the override resolve against the working directory.
//!
//! ## Error Handling
//!
//! All functions return `Result<T, RepathError>`. The caller maps errors to
//! exit codes via `OutputErrorCode`.

use std::io::Write;
use std::path::Path;

use repath_core::config::{RewriteConfig, DEFAULT_CONFIG_FILE};
use repath_core::diff::generate_unified_diff;
use repath_core::error::{RepathError, RepathResult};

use crate::fix::{fix_tree, FixOptions};
use crate::output::{emit_response, emit_summary, progress_line, FixReport};

/// Resolve the configuration for a run.
pub fn resolve_config(
    config_path: Option<&Path>,
    root_override: Option<&Path>,
    cwd: &Path,
) -> RepathResult<RewriteConfig> {
    let config = match config_path {
        Some(path) => RewriteConfig::load(&absolutize(cwd, path))?,
        None => {
            let local = cwd.join(DEFAULT_CONFIG_FILE);
            if local.is_file() {
                RewriteConfig::load(&local)?
            } else {
                tracing::debug!("No {} found, using built-in preset", DEFAULT_CONFIG_FILE);
                let builtin = RewriteConfig::builtin()?;
                let root = absolutize(cwd, &builtin.root);
                builtin.with_root(root)
            }
        }
    };

    Ok(match root_override {
        Some(root) => config.with_root(absolutize(cwd, root)),
        None => config,
    })
}

fn absolutize(cwd: &Path, path: &Path) -> std::path::PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// How a run reports its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOutput {
    /// Emit a JSON report instead of text lines.
    pub json: bool,
    /// Print a unified diff for each modified file. Text mode only; combining
    /// it with `json` is an invalid-arguments error.
    pub diff: bool,
}

/// Rewrite (or preview) the tree, streaming progress to `out`.
pub fn run_fix(
    config: &RewriteConfig,
    apply: bool,
    output: RunOutput,
    out: &mut impl Write,
) -> RepathResult<FixReport> {
    if output.json && output.diff {
        return Err(RepathError::invalid_args(
            "--diff cannot be combined with --format json",
        ));
    }
    let dry_run = !apply;
    let report = fix_tree(config, FixOptions { apply }, |outcome| {
        if output.json {
            return Ok(());
        }
        writeln!(out, "{}", progress_line(&outcome.relative_path, dry_run))
            .map_err(stdout_error)?;
        if output.diff {
            let diff =
                generate_unified_diff(&outcome.relative_path, &outcome.original, &outcome.rewritten);
            write!(out, "{}", diff).map_err(stdout_error)?;
        }
        Ok(())
    })?;

    if output.json {
        emit_response(&report, out).map_err(stdout_error)?;
    } else {
        emit_summary(&report, out).map_err(stdout_error)?;
    }
    Ok(report)
}

/// Dry-run the tree and report whether anything still needs rewriting.
///
/// Returns the report; the caller decides the exit status from
/// `report.total_fixed`.
pub fn run_check(
    config: &RewriteConfig,
    output: RunOutput,
    out: &mut impl Write,
) -> RepathResult<FixReport> {
    run_fix(config, false, output, out)
}

/// Print the resolved configuration as TOML.
pub fn run_show_config(config: &RewriteConfig, out: &mut impl Write) -> RepathResult<()> {
    let text = config.to_toml()?;
    write!(out, "{}", text).map_err(stdout_error)
}

fn stdout_error(e: std::io::Error) -> RepathError {
    RepathError::internal(format!("failed to write output: {}", e))
}

// ============================================================================
// Tests
// ============================================================================
