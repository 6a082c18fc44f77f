/// Failure to read one cell from a row buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    /// The cell, or the string offset it holds, lies past the end of the page.
    #[error("read of {width} byte(s) at 0x{address:X} is out of bounds (page length {len})")]
    OutOfBounds {
        address: usize,
        width: usize,
        len: usize,
    },
}
