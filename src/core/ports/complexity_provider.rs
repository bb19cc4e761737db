//! Complexity report provider port

use super::super::models::ComplexityReport;

/// Source of an optional complexity report
pub trait ComplexityReportProvider {
    /// The current report, or `None` when no analysis has been run
    fn report(&self) -> anyhow::Result<Option<ComplexityReport>>;
}
