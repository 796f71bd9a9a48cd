//! ebpd CLI - Inspect status codes and owned descriptors

use clap::{Parser, Subcommand};
use ebpd_core::Code;
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod error;
mod inspect;
mod report;

use config::OutputFormat;
use error::CliError;

#[derive(Parser)]
#[command(name = "ebpd")]
#[command(author, version, about = "Inspect ebpd status codes and owned descriptors")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true, env = "EBPD_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe an errno value
    Errno {
        /// Raw errno value (0 is success)
        value: i32,
    },

    /// Open a path read-only into an owned descriptor and report on it
    Open {
        /// Path to open
        path: PathBuf,
    },
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Errno { value } => {
            let report = report::CodeReport::from(Code::from_errno(*value));
            println!("{}", report::render_code(cli.format, &report)?);
        }

        Commands::Open { path } => {
            tracing::info!(path = %path.display(), "inspecting");
            let inspection = inspect::inspect(path).into_result()?;
            println!("{}", report::render_inspection(cli.format, &inspection)?);
        }
    }

    Ok(())
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so JSON on stdout stays machine readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(config::log_filter(&config::log_directives())?)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::Status(status)) => {
            tracing::debug!(code = %status.code(), "command failed");
            eprintln!("{}", report::render_status(cli.format, &status)?);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}
