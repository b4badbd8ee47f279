mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::diff::{OverlayCheck, SurfaceDiff};
use miette::Result;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Reporter for diff and overlay results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Report a surface diff. Terminal output stays silent when nothing changed.
    pub fn report_diff(&self, diff: &SurfaceDiff, manifest_name: &str) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new().report_diff(diff, manifest_name);
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new().report_diff(diff),
        }
    }

    /// Report an overlay containment check
    pub fn report_overlay(&self, check: &OverlayCheck) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new().report_overlay(check);
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new().report_overlay(check),
        }
    }
}
