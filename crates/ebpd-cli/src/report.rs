//! Rendering of codes, statuses and inspections

use crate::config::OutputFormat;
use crate::error::CliError;
use crate::inspect::Inspection;
use ebpd_core::{Code, Status};
use serde::Serialize;

/// Description of a single code
#[derive(Debug, Clone, Serialize)]
pub struct CodeReport {
    pub code: Code,
    pub name: String,
    pub message: &'static str,
    pub is_error: bool,
}

impl From<Code> for CodeReport {
    fn from(code: Code) -> Self {
        Self {
            code,
            name: code.name(),
            message: code.message(),
            is_error: code.is_error(),
        }
    }
}

pub fn render_code(format: OutputFormat, report: &CodeReport) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(format!(
            "{} ({})\nvalue: {}\nerror: {}",
            report.name,
            report.message,
            report.code.value(),
            report.is_error
        )),
    }
}

pub fn render_inspection(format: OutputFormat, inspection: &Inspection) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(inspection)?),
        OutputFormat::Text => Ok(format!(
            "{}: fd {} size {} bytes",
            inspection.path, inspection.fd, inspection.size
        )),
    }
}

/// Render `status` with its full causal chain, proximate error first
pub fn render_status(format: OutputFormat, status: &Status) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(status)?);
    }
    if status.is_ok() {
        return Ok("ok".to_string());
    }
    let lines: Vec<String> = status
        .chain()
        .enumerate()
        .map(|(depth, cause)| {
            if depth == 0 {
                format!("error: {cause}")
            } else {
                format!("  caused by: {cause}")
            }
        })
        .collect();
    Ok(lines.join("\n"))
}
