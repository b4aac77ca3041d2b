//! Reading command input and saved reports.

use crate::models::StrategicReport;
use crate::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Resolves a text argument.
///
/// `-` reads stdin, `@path` reads a file, anything else is used as given.
///
/// # Errors
///
/// Returns an error if stdin or the file cannot be read.
pub fn read_text_arg(value: &str) -> Result<String> {
    if value == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| Error::OperationFailed {
                operation: "read_stdin".to_string(),
                cause: e.to_string(),
            })?;
        return Ok(buf);
    }

    if let Some(path) = value.strip_prefix('@') {
        return std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_input_file".to_string(),
            cause: format!("{path}: {e}"),
        });
    }

    Ok(value.to_string())
}

/// Loads a strategic report saved with `plan --save`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a report.
pub fn load_report(path: &Path) -> Result<StrategicReport> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_report".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    serde_json::from_str(&contents).map_err(|e| Error::InvalidInput(format!(
        "{} is not a strategic report: {e}",
        path.display()
    )))
}

/// Saves a strategic report as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_report(path: &Path, report: &StrategicReport) -> Result<()> {
    let json = super::to_pretty_json(report)?;
    std::fs::write(path, json).map_err(|e| Error::OperationFailed {
        operation: "save_report".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    tracing::info!(path = %path.display(), "Saved strategic report");
    Ok(())
}
