//! Report generation port trait.

use crate::domain::error::AnalyzerError;
use crate::domain::report::AnalysisReport;
use std::io::Write;

/// Port for rendering an analysis report.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<(), AnalyzerError>;

    /// Default implementation: renders into an in-memory string.
    fn render(&self, report: &AnalysisReport) -> Result<String, AnalyzerError> {
        let mut buf = Vec::new();
        self.write(report, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
