//! Row serialization of one sheet.
//!
//! Output is a four-line header block (column index, display name, byte
//! offset, column type) followed by one record per row, or per sub-row for
//! [`SheetVariant::Subrows`] sheets. Rows keep page order, then archive row
//! order, then sub-row order.

use std::{
    fmt::Write as _,
    io::{self, Write},
};

use bytes::Buf;
use exd2csv_core::{DataPage, RowKey, RowPointer, SheetHeader, SheetVariant, TextDecoder};
use exd2csv_decode::{CellContext, RowView, decode_cell};
use exd2csv_schema::ColumnInfo;

use crate::{csv::CsvWriter, error::ExportError};

/// Leading cells of the four header lines.
const KEY_ROW_LABEL: &str = "key";
const NAME_ROW_LABEL: &str = "#";
const OFFSET_ROW_LABEL: &str = "offset";
/// Type of the row id column.
const ID_COLUMN_TYPE: &str = "Int32";

/// Each sub-row is prefixed by its 2-byte sub-row id.
const SUBROW_ID_SIZE: usize = 2;
/// Offset of the sub-row count within the row prologue.
const SUBROW_COUNT_OFFSET: usize = 4;

/// Everything about a sheet that stays fixed while its rows are written.
#[derive(Debug, Clone, Copy)]
pub struct SheetLayout<'a> {
    pub sheet: &'a str,
    pub header: &'a SheetHeader,
    /// Bound columns in physical order.
    pub columns: &'a [ColumnInfo],
    /// Suppress cell decode diagnostics.
    pub silent: bool,
}

/// Streams one sheet as CSV into `W`.
///
/// The header block is written by [`SheetSerializer::start`], so a serializer
/// always holds a well-formed header even if no page is ever written.
pub struct SheetSerializer<'a, W: Write, D: TextDecoder + ?Sized> {
    layout: SheetLayout<'a>,
    text: &'a mut D,
    csv: CsvWriter<W>,
    cell: String,
    rows: usize,
}

impl<'a, W: Write, D: TextDecoder + ?Sized> SheetSerializer<'a, W, D> {
    pub fn start(layout: SheetLayout<'a>, text: &'a mut D, dest: W) -> io::Result<Self> {
        let mut csv = CsvWriter::new(dest);
        write_header_block(&mut csv, layout.columns)?;
        Ok(Self {
            layout,
            text,
            csv,
            cell: String::new(),
            rows: 0,
        })
    }

    /// Write every row of `page`.
    pub fn write_page(&mut self, page: &DataPage) -> Result<(), ExportError> {
        let data = page.data.as_ref();
        let data_size = usize::from(self.layout.header.row_data_size);

        for pointer in &page.rows {
            let start = pointer.data_start();
            match self.layout.header.variant {
                SheetVariant::Flat => {
                    let row = RowView::new(data, start, data_size);
                    self.write_row(RowKey::row(pointer.row_id), &row)?;
                }
                SheetVariant::Subrows => {
                    let count = subrow_count(data, pointer).ok_or_else(|| {
                        ExportError::RowOutOfBounds {
                            sheet: self.layout.sheet.to_string(),
                            row_id: pointer.row_id,
                            offset: pointer.offset,
                        }
                    })?;
                    for subrow_id in 0..count {
                        let subrow_start = start
                            + usize::from(subrow_id) * (data_size + SUBROW_ID_SIZE)
                            + SUBROW_ID_SIZE;
                        let row = RowView::new(data, subrow_start, data_size);
                        self.write_row(RowKey::subrow(pointer.row_id, subrow_id), &row)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Number of records written so far, header block excluded.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the destination with the number of records written.
    pub fn finish(mut self) -> io::Result<(W, usize)> {
        self.csv.flush()?;
        Ok((self.csv.into_inner(), self.rows))
    }

    fn write_row(&mut self, key: RowKey, row: &RowView<'_>) -> io::Result<()> {
        self.cell.clear();
        // Writing into a String cannot fail.
        let _ = write!(self.cell, "{key}");
        self.csv.field(&self.cell)?;

        let ctx = CellContext {
            sheet: self.layout.sheet,
            row: key,
            silent: self.layout.silent,
        };
        for column in self.layout.columns {
            self.cell.clear();
            decode_cell(&ctx, row, &column.definition, &mut *self.text, &mut self.cell);
            if column.definition.column_type.is_string() {
                self.csv.quoted_field(&self.cell)?;
            } else {
                self.csv.field(&self.cell)?;
            }
        }

        self.csv.end_record()?;
        self.rows += 1;
        Ok(())
    }
}

fn write_header_block<W: Write>(csv: &mut CsvWriter<W>, columns: &[ColumnInfo]) -> io::Result<()> {
    csv.field(KEY_ROW_LABEL)?;
    for index in 0..columns.len() {
        csv.field(&index.to_string())?;
    }
    csv.end_record()?;

    csv.field(NAME_ROW_LABEL)?;
    for column in columns {
        csv.field(if column.is_unknown {
            ""
        } else {
            column.display_name.as_str()
        })?;
    }
    csv.end_record()?;

    csv.field(OFFSET_ROW_LABEL)?;
    for column in columns {
        csv.field(&column.definition.offset.to_string())?;
    }
    csv.end_record()?;

    csv.field(ID_COLUMN_TYPE)?;
    for column in columns {
        csv.field(&column.definition.column_type.to_string())?;
    }
    csv.end_record()
}

fn subrow_count(data: &[u8], pointer: &RowPointer) -> Option<u16> {
    let mut buf = data.get(pointer.offset as usize + SUBROW_COUNT_OFFSET..)?;
    buf.try_get_u16().ok()
}
