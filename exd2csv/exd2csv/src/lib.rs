//! Parallel EXD sheet to CSV export.
//!
//! [`Exporter`] resolves sheets through a [`SheetSource`], names their columns
//! from an optional schema and writes one CSV file per sheet, fanning the
//! sheets out over a bounded worker pool.

mod cache;
mod csv;
mod error;
mod exporter;
mod options;
mod output;
mod serializer;
mod summary;

pub use cache::{DirectoryCache, SchemaCache};
pub use csv::{CsvWriter, LINE_TERMINATOR, UTF8_BOM, escape_field};
pub use error::ExportError;
pub use exporter::{Exporter, select_sheets};
pub use options::{
    DEFAULT_FAILURE_DETAIL_LIMIT, DEFAULT_PARALLELISM_CEILING, ExportOptions,
    ExportOptionsBuilder, MAX_PARALLELISM, resolve_parallelism,
};
pub use output::{ClearPolicy, PrepareOutcome, prepare_output_dir};
pub use serializer::{SheetLayout, SheetSerializer};
pub use summary::{ExportSummary, SheetFailure, SheetReport};

pub use exd2csv_core as core;
pub use exd2csv_core::{SheetSource, TextDecoder};
pub use exd2csv_decode as decode;
pub use exd2csv_schema as schema;
