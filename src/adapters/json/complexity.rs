//! Complexity report read from a JSON file

use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::core::models::ComplexityReport;
use crate::core::ports::ComplexityReportProvider;

/// Complexity report provider backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonComplexityReportProvider {
    path: PathBuf,
}

impl JsonComplexityReportProvider {
    /// Create a provider for the given report file
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ComplexityReportProvider for JsonComplexityReportProvider {
    fn report(&self) -> anyhow::Result<Option<ComplexityReport>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let report = serde_json::from_str(&content)
            .with_context(|| format!("invalid complexity report in {}", self.path.display()))?;
        Ok(Some(report))
    }
}
