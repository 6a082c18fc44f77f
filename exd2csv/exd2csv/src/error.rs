//! Error types for sheet export.

use exd2csv_core::{Language, SourceError};

/// Errors that abort the export of a single sheet.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The sheet header could not be resolved.
    #[error("failed to read header of sheet '{sheet}': {source}")]
    Header {
        sheet: String,
        #[source]
        source: SourceError,
    },

    /// The archive failed while resolving a data page. A page that simply
    /// does not exist is skipped instead.
    #[error("failed to read page {start_id} ({language:?}) of sheet '{sheet}': {source}")]
    DataPage {
        sheet: String,
        start_id: u32,
        language: Language,
        #[source]
        source: SourceError,
    },

    /// A row prologue lies outside its data page.
    #[error("row {row_id} of sheet '{sheet}' at offset 0x{offset:X} is out of bounds")]
    RowOutOfBounds {
        sheet: String,
        row_id: u32,
        offset: u32,
    },

    /// I/O error while creating directories or writing CSV output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The finished temporary file could not be moved to its final path.
    #[error("failed to write '{path}': {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
