//! Strings stored behind the fixed-width part of a row.
//!
//! A string column holds a big-endian `u32` offset relative to the end of the
//! row's fixed-width data. The bytes at that position run up to the next NUL
//! or the end of the page.

use bytes::Buf;
use exd2csv_core::TextDecoder;

use crate::error::CellError;

/// Resolve the string whose offset is stored at `field_address` and append
/// its decoded text to `out`.
///
/// A start position at or past the page end, or an immediately terminated
/// string, yields empty text. Only an unreadable offset field is an error.
pub fn resolve_string<D: TextDecoder + ?Sized>(
    data: &[u8],
    field_address: usize,
    row_start: usize,
    row_data_size: usize,
    text: &mut D,
    out: &mut String,
) -> Result<(), CellError> {
    let mut buf = data.get(field_address..).unwrap_or_default();
    let relative = buf
        .try_get_u32()
        .map_err(|_| CellError::OutOfBounds {
            address: field_address,
            width: 4,
            len: data.len(),
        })? as usize;

    let start = row_start
        .saturating_add(row_data_size)
        .saturating_add(relative);
    let Some(tail) = data.get(start..) else {
        return Ok(());
    };
    let len = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    if len > 0 {
        text.decode_into(&tail[..len], out);
    }
    Ok(())
}
