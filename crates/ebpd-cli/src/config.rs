//! CLI configuration

use clap::ValueEnum;
use std::fmt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Log filter used when `EBPD_LOG` is unset or blank
pub const DEFAULT_LOG_DIRECTIVES: &str = "ebpd=info";

/// Get the log directives from EBPD_LOG env var or `ebpd=info`
pub fn log_directives() -> String {
    directives_or_default(std::env::var("EBPD_LOG").ok())
}

fn directives_or_default(value: Option<String>) -> String {
    value
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVES.to_string())
}

/// Build the log filter from a comma separated directive list
pub fn log_filter(directives: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(directives)
}
