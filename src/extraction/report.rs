//! Hypothesis report writer

use crate::io::configuration::REPORT_HEADING;
use crate::io::error::{Result, file_system};
use std::fs;
use std::path::Path;

/// Full report text: the fixed heading followed by `body`
pub fn format_report(body: &str) -> String {
    format!("{REPORT_HEADING}{body}")
}

/// Write the report, creating its directory and replacing any previous report
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file written
pub fn write_report(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }
    fs::write(path, format_report(body)).map_err(file_system(path, "write report"))
}
