//! Column value decoding for EXD row data.
//!
//! - [`decode_column`]: fixed-width big-endian columns, bools and packed bit fields
//! - [`resolve_string`]: offset-addressed NUL-terminated strings behind the row data
//! - [`decode_cell`]: per-cell failure policy and decode diagnostics

mod cell;
mod error;
mod string;
mod value;

pub use cell::{CellContext, SILENT_SHEETS, decode_cell, hex_dump};
pub use error::CellError;
pub use string::resolve_string;
pub use value::{RowView, decode_column};
