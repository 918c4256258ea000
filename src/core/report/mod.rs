//! Class report generation
//!
//! [`ClassReport`] holds the statistics; a [`ReportGenerator`] renders them.
//! The interactive screen and the saved report file both come from the same
//! `render` call on the same `ClassReport`.

pub mod stats;
pub mod text;

pub use stats::{ClassReport, Extreme};
pub use text::TextReporter;

use crate::core::error::{StoreError, StoreResult};
use std::fs;
use std::path::Path;

/// Default report file name
pub const REPORT_FILENAME: &str = "class_report.txt";

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the report as text
    fn render(&self, report: &ClassReport) -> String;

    /// Render the report and write it to `output_path`, replacing any existing file
    ///
    /// # Errors
    /// [`StoreError::Io`] if the file cannot be written
    fn generate(&self, report: &ClassReport, output_path: &Path) -> StoreResult<()> {
        write_report(&self.render(report), output_path)
    }
}

/// Write already-rendered report text to `output_path`, replacing any existing file
///
/// # Errors
/// [`StoreError::Io`] if the file cannot be written
pub fn write_report(text: &str, output_path: &Path) -> StoreResult<()> {
    fs::write(output_path, text).map_err(|e| StoreError::io(output_path, e))
}
