use std::{fmt, path::PathBuf, time::Duration};

use exd2csv_core::Language;

/// A sheet that could not be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFailure {
    pub sheet: String,
    pub message: String,
}

/// A sheet that was exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub sheet: String,
    pub path: PathBuf,
    /// Language whose pages were read.
    pub language: Language,
    /// Records written, header block excluded.
    pub rows: usize,
    pub has_schema: bool,
}

/// Outcome of a batch export.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub attempted: usize,
    pub succeeded: usize,
    /// Succeeded sheets that had a matching schema.
    pub with_schema: usize,
    /// Failures in input sheet order.
    pub failures: Vec<SheetFailure>,
    pub elapsed: Duration,
    /// Failures listed by the `Display` impl.
    pub failure_detail_limit: usize,
}

impl ExportSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sheets: {} | succeeded: {} | failed: {} | with schema: {} | {:.2}s",
            self.attempted,
            self.succeeded,
            self.failed(),
            self.with_schema,
            self.elapsed.as_secs_f64()
        )?;

        if self.failures.is_empty() || self.failure_detail_limit == 0 {
            return Ok(());
        }
        let shown = self.failures.len().min(self.failure_detail_limit);
        write!(f, "\nfailures (first {shown}):")?;
        for failure in &self.failures[..shown] {
            write!(f, "\n  - {}: {}", failure.sheet, failure.message)?;
        }
        if self.failures.len() > shown {
            write!(f, "\n  ... and {} more", self.failures.len() - shown)?;
        }
        Ok(())
    }
}
