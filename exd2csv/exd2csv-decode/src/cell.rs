//! Per-cell failure policy.
//!
//! A cell that cannot be read becomes empty text so the row is still emitted.
//! The failure is logged with enough context to locate the bad bytes, unless
//! the sheet is on the silent list.

use exd2csv_core::{ColumnDefinition, RowKey, TextDecoder};

use crate::{
    error::CellError,
    value::{RowView, decode_column},
};

/// Sheets whose schemas are known to disagree with their row layout.
/// Decode failures in these sheets are swallowed without a diagnostic.
// TODO: recheck both sheets against the next schema version and drop the
// entries that decode cleanly.
pub const SILENT_SHEETS: [&str; 2] = ["CustomTalkDefineClient", "QuestDefineClient"];

const DUMP_LEN: usize = 16;

/// Where a cell lives, for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    pub sheet: &'a str,
    pub row: RowKey,
    /// Suppress diagnostics for this sheet.
    pub silent: bool,
}

/// Decode one cell into `out`, substituting empty text on failure.
///
/// Returns `false` when the cell could not be read.
pub fn decode_cell<D: TextDecoder + ?Sized>(
    ctx: &CellContext<'_>,
    row: &RowView<'_>,
    column: &ColumnDefinition,
    text: &mut D,
    out: &mut String,
) -> bool {
    let mark = out.len();
    match decode_column(row, column, text, out) {
        Ok(()) => true,
        Err(err) => {
            out.truncate(mark);
            if !ctx.silent {
                report(ctx, row, column, &err);
            }
            false
        }
    }
}

fn report(ctx: &CellContext<'_>, row: &RowView<'_>, column: &ColumnDefinition, err: &CellError) {
    let address = row.address_of(column);
    tracing::warn!(
        sheet = ctx.sheet,
        row = %ctx.row,
        column_offset = %format!("0x{:X}", column.offset),
        column_type = %column.column_type,
        address = %format!("0x{address:X}"),
        bytes = %hex_dump(row.data, address),
        error = %err,
        "failed to decode cell"
    );
}

/// Up to 16 bytes at `address` as space-separated hex.
pub fn hex_dump(data: &[u8], address: usize) -> String {
    match data.get(address..) {
        Some(rest) if !rest.is_empty() => rest
            .iter()
            .take(DUMP_LEN)
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" "),
        _ => "N/A (out of bounds)".to_string(),
    }
}
