//! Export configuration.

use std::{num::NonZeroUsize, path::PathBuf, thread};

use exd2csv_core::Language;
use exd2csv_decode::SILENT_SHEETS;

use crate::output::ClearPolicy;

/// Upper bound of the default worker count, to keep output I/O reasonable.
pub const DEFAULT_PARALLELISM_CEILING: usize = 32;
/// Hard upper bound of the worker count, even when set explicitly.
pub const MAX_PARALLELISM: usize = 128;
/// Failures listed in a rendered [`ExportSummary`](crate::ExportSummary).
pub const DEFAULT_FAILURE_DETAIL_LIMIT: usize = 10;

/// Settings shared by every sheet of an export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    /// Language requested for localized sheets.
    pub language: Language,
    /// Worker count; `None` picks one from the available cores.
    pub parallelism: Option<usize>,
    /// Sheets whose cell decode failures are not logged.
    pub silent_sheets: Vec<String>,
    pub failure_detail_limit: usize,
    pub clear_policy: ClearPolicy,
    /// Clear the output directory even if it holds files other than CSV.
    pub allow_foreign_files: bool,
    /// Sheet names to export (case-insensitive); empty exports everything.
    pub filters: Vec<String>,
}

impl ExportOptions {
    /// Create a builder writing into `output_dir`.
    pub fn builder(output_dir: impl Into<PathBuf>) -> ExportOptionsBuilder {
        ExportOptionsBuilder {
            options: ExportOptions {
                output_dir: output_dir.into(),
                language: Language::English,
                parallelism: None,
                silent_sheets: SILENT_SHEETS.iter().map(|s| s.to_string()).collect(),
                failure_detail_limit: DEFAULT_FAILURE_DETAIL_LIMIT,
                clear_policy: ClearPolicy::default(),
                allow_foreign_files: false,
                filters: Vec::new(),
            },
        }
    }

    /// Worker count after defaults and clamping to `[1, MAX_PARALLELISM]`.
    pub fn effective_parallelism(&self) -> usize {
        resolve_parallelism(self.parallelism)
    }

    pub fn is_silent(&self, sheet: &str) -> bool {
        self.silent_sheets.iter().any(|s| s == sheet)
    }

    /// An export limited by a sheet filter.
    pub fn is_partial(&self) -> bool {
        !self.filters.is_empty()
    }
}

/// Resolve a requested worker count.
///
/// `None` means the available cores, capped at [`DEFAULT_PARALLELISM_CEILING`].
/// The result is always within `[1, MAX_PARALLELISM]`.
pub fn resolve_parallelism(requested: Option<usize>) -> usize {
    requested
        .unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
                .min(DEFAULT_PARALLELISM_CEILING)
        })
        .clamp(1, MAX_PARALLELISM)
}

/// Builder for [`ExportOptions`].
pub struct ExportOptionsBuilder {
    options: ExportOptions,
}

impl ExportOptionsBuilder {
    /// Requested language (default: English).
    pub fn with_language(mut self, language: Language) -> Self {
        self.options.language = language;
        self
    }

    /// Number of sheets exported concurrently.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.options.parallelism = Some(parallelism);
        self
    }

    /// Replace the default silent-sheet list.
    pub fn with_silent_sheets<I, S>(mut self, sheets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.silent_sheets = sheets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_failure_detail_limit(mut self, limit: usize) -> Self {
        self.options.failure_detail_limit = limit;
        self
    }

    pub fn with_clear_policy(mut self, policy: ClearPolicy) -> Self {
        self.options.clear_policy = policy;
        self
    }

    pub fn allow_foreign_files(mut self, allow: bool) -> Self {
        self.options.allow_foreign_files = allow;
        self
    }

    /// Only export sheets matching one of `filters`.
    pub fn with_filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.filters = filters.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> ExportOptions {
        self.options
    }
}
