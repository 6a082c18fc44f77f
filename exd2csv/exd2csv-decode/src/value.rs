//! Fixed-width column decoding to canonical text.

use std::fmt::{Display, Write as _};

use bytes::Buf;
use exd2csv_core::{ColumnDefinition, ColumnType, TextDecoder};

use crate::{error::CellError, string::resolve_string};

/// One (sub-)row inside a data page buffer.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    /// Whole data page.
    pub data: &'a [u8],
    /// Offset of the row's fixed-width data within `data`.
    pub start: usize,
    /// Size of the fixed-width data; string bytes start right after it.
    pub data_size: usize,
}

impl<'a> RowView<'a> {
    pub fn new(data: &'a [u8], start: usize, data_size: usize) -> Self {
        Self {
            data,
            start,
            data_size,
        }
    }

    /// Absolute position of `column` within the page.
    pub fn address_of(&self, column: &ColumnDefinition) -> usize {
        self.start.saturating_add(usize::from(column.offset))
    }
}

/// Append the text form of `column` in `row` to `out`.
///
/// Numbers are big-endian and rendered in canonical decimal form, bools as
/// `true`/`false`. On error nothing is appended.
pub fn decode_column<D: TextDecoder + ?Sized>(
    row: &RowView<'_>,
    column: &ColumnDefinition,
    text: &mut D,
    out: &mut String,
) -> Result<(), CellError> {
    let address = row.address_of(column);
    let mut buf = row.data.get(address..).unwrap_or_default();
    let eof_err = |width| CellError::OutOfBounds {
        address,
        width,
        len: row.data.len(),
    };

    match column.column_type {
        ColumnType::String => {
            return resolve_string(row.data, address, row.start, row.data_size, text, out);
        }
        ColumnType::Bool => push(out, buf.try_get_u8().map_err(|_| eof_err(1))? != 0),
        ColumnType::Int8 => push(out, buf.try_get_i8().map_err(|_| eof_err(1))?),
        ColumnType::UInt8 => push(out, buf.try_get_u8().map_err(|_| eof_err(1))?),
        ColumnType::Int16 => push(out, buf.try_get_i16().map_err(|_| eof_err(2))?),
        ColumnType::UInt16 => push(out, buf.try_get_u16().map_err(|_| eof_err(2))?),
        ColumnType::Int32 => push(out, buf.try_get_i32().map_err(|_| eof_err(4))?),
        ColumnType::UInt32 => push(out, buf.try_get_u32().map_err(|_| eof_err(4))?),
        ColumnType::Float32 => push(out, buf.try_get_f32().map_err(|_| eof_err(4))?),
        ColumnType::Int64 => push(out, buf.try_get_i64().map_err(|_| eof_err(8))?),
        ColumnType::UInt64 => push(out, buf.try_get_u64().map_err(|_| eof_err(8))?),
        ColumnType::PackedBool0
        | ColumnType::PackedBool1
        | ColumnType::PackedBool2
        | ColumnType::PackedBool3
        | ColumnType::PackedBool4
        | ColumnType::PackedBool5
        | ColumnType::PackedBool6
        | ColumnType::PackedBool7 => {
            let bit = column.column_type.packed_bit().unwrap_or_default();
            let byte = buf.try_get_u8().map_err(|_| eof_err(1))?;
            push(out, byte & (1 << bit) != 0);
        }
        ColumnType::Unknown(raw) => push(out, format_args!("<unknown:{raw}>")),
    }
    Ok(())
}

fn push(out: &mut String, value: impl Display) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{value}");
}
