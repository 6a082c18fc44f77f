//! Binding of schema names to physical columns.
//!
//! Columns are matched to schema names in byte-offset order, since schemas
//! are written against the row layout. The bound list is then returned in
//! physical (header) order.

use exd2csv_core::{ColumnDefinition, SheetSchema};

use crate::expand::expand_field_names;

/// Prefix of synthetic names given to columns the schema does not describe.
pub const UNKNOWN_PREFIX: &str = "Unknown";

/// A physical column with its resolved display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub definition: ColumnDefinition,
    /// Position of the column in the sheet header.
    pub original_index: usize,
    pub display_name: String,
    /// No schema name could be matched to this column.
    pub is_unknown: bool,
}

/// Attach display names from `schema` to `columns`.
///
/// Returns exactly one entry per column, ordered by `original_index`.
/// Without a schema, or with an empty one, every column is named by its
/// original index and marked unknown. Columns beyond the expanded names are
/// named `Unknown{original_index}`; any name starting with `Unknown`
/// (ignoring case) marks its column unknown.
pub fn bind_columns(columns: &[ColumnDefinition], schema: Option<&SheetSchema>) -> Vec<ColumnInfo> {
    let mut by_offset: Vec<(usize, ColumnDefinition)> =
        columns.iter().copied().enumerate().collect();
    // Stable: columns sharing an offset (packed bools) keep header order.
    by_offset.sort_by_key(|(_, def)| def.offset);

    let names = match schema {
        Some(schema) if !schema.fields.is_empty() => Some(expand_field_names(&schema.fields)),
        _ => None,
    };

    let mut bound: Vec<ColumnInfo> = by_offset
        .into_iter()
        .enumerate()
        .map(|(position, (original_index, definition))| {
            let (display_name, is_unknown) = match &names {
                None => (original_index.to_string(), true),
                Some(names) => {
                    let name = names
                        .get(position)
                        .cloned()
                        .unwrap_or_else(|| format!("{UNKNOWN_PREFIX}{original_index}"));
                    let is_unknown = is_unknown_name(&name);
                    (name, is_unknown)
                }
            };
            ColumnInfo {
                definition,
                original_index,
                display_name,
                is_unknown,
            }
        })
        .collect();

    bound.sort_by_key(|info| info.original_index);
    bound
}

fn is_unknown_name(name: &str) -> bool {
    name.get(..UNKNOWN_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(UNKNOWN_PREFIX))
}
