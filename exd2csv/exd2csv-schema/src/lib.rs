//! Schema-driven column naming.
//!
//! Schemas describe columns in byte-layout order, possibly as fixed-size
//! arrays of scalars or structs. [`expand_field_names`] flattens a schema into
//! one display name per column and [`bind_columns`] attaches those names to
//! the physical columns of a sheet.

mod bind;
mod expand;

pub use bind::{ColumnInfo, UNKNOWN_PREFIX, bind_columns};
pub use expand::expand_field_names;
