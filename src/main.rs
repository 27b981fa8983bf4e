//! Binary entry point for the repath CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Rewrite imports under the configured root
//! repath fix
//!
//! # Preview with a diff, nothing written
//! repath fix --dry-run --diff
//!
//! # Fail (exit 1) if any file still needs rewriting
//! repath check
//!
//! # Show the resolved configuration
//! repath --config moves.toml config
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use repath::cli::{resolve_config, run_check, run_fix, run_show_config, RunOutput};
use repath::error::{OutputErrorCode, RepathError};
use repath::output::{emit_response, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Rewrite relative imports after relocating modules into subfolders.
#[derive(Parser, Debug)]
#[command(name = "repath", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Config file (default: repath.toml in the working directory, else the built-in preset).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the reorganized root from the config.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,
}

/// Log line format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Output format for fix and check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Progress lines and a total (default).
    #[default]
    Text,
    /// Full JSON report.
    Json,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite imports in every file under the root's subfolders.
    Fix {
        /// Report what would change without writing files.
        #[arg(long)]
        dry_run: bool,
        /// Print a unified diff of each changed file.
        #[arg(long)]
        diff: bool,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Exit with status 1 if any file still needs rewriting.
    Check {
        /// Print a unified diff of each pending change.
        #[arg(long)]
        diff: bool,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the resolved configuration as TOML.
    Config,
}

impl Command {
    fn format(&self) -> OutputFormat {
        match self {
            Command::Fix { format, .. } | Command::Check { format, .. } => *format,
            Command::Config => OutputFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.global.log_level, cli.global.log_format);

    let format = cli.command.format();
    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            match format {
                OutputFormat::Json => {
                    let _ = emit_response(&ErrorResponse::new(&err), &mut io::stdout());
                    let _ = io::stdout().flush();
                }
                OutputFormat::Text => eprintln!("error: {}", err),
            }
            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel, format: LogFormat) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<ExitCode, RepathError> {
    let cwd = std::env::current_dir()
        .map_err(|e| RepathError::internal(format!("failed to get current directory: {}", e)))?;
    let config = resolve_config(
        cli.global.config.as_deref(),
        cli.global.root.as_deref(),
        &cwd,
    )?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Fix {
            dry_run,
            diff,
            format,
        } => {
            let output = RunOutput {
                json: format == OutputFormat::Json,
                diff,
            };
            run_fix(&config, !dry_run, output, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { diff, format } => {
            let output = RunOutput {
                json: format == OutputFormat::Json,
                diff,
            };
            let report = run_check(&config, output, &mut stdout)?;
            if report.total_fixed > 0 {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Config => {
            run_show_config(&config, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
