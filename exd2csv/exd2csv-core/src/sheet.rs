//! Sheet header metadata and data pages as handed over by an archive reader.

use std::fmt;

use bytes::Bytes;

use crate::{
    column::ColumnDefinition,
    language::{DEFAULT_FALLBACK_LANGUAGE, Language},
};

/// Bytes in front of every row: a 4-byte size and a 2-byte sub-row count.
pub const ROW_PROLOGUE_SIZE: usize = 6;

/// Row layout shared by every row of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetVariant {
    /// One record per row id.
    #[default]
    Flat,
    /// Several stacked records per row id, each prefixed by a 2-byte sub-row id.
    Subrows,
}

/// Row id range stored in one data page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPageDef {
    pub start_id: u32,
    pub row_count: u32,
}

/// Decoded sheet header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetHeader {
    /// Size of the fixed-width part of one (sub-)row; string data follows it.
    pub row_data_size: u16,
    pub variant: SheetVariant,
    pub pages: Vec<DataPageDef>,
    pub columns: Vec<ColumnDefinition>,
    pub languages: Vec<Language>,
}

impl SheetHeader {
    /// Pick the language whose pages should be read for `requested`.
    ///
    /// Order: language-agnostic data, the requested language, the default
    /// fallback language, then the first declared language. A header that
    /// declares nothing resolves to [`Language::None`].
    pub fn resolve_language(&self, requested: Language) -> Language {
        [Language::None, requested, DEFAULT_FALLBACK_LANGUAGE]
            .into_iter()
            .find(|lang| self.languages.contains(lang))
            .or_else(|| self.languages.first().copied())
            .unwrap_or(Language::None)
    }
}

/// Location of one row inside a data page buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPointer {
    pub row_id: u32,
    /// Offset of the row prologue within [`DataPage::data`].
    pub offset: u32,
}

impl RowPointer {
    pub fn new(row_id: u32, offset: u32) -> Self {
        Self { row_id, offset }
    }

    /// Start of the row's fixed-width data, just past the prologue.
    pub fn data_start(&self) -> usize {
        self.offset as usize + ROW_PROLOGUE_SIZE
    }
}

/// One resolved data page: its row index in archive order and the raw bytes
/// the pointers address.
#[derive(Debug, Clone, Default)]
pub struct DataPage {
    pub rows: Vec<RowPointer>,
    pub data: Bytes,
}

/// Identifier written in the first column of an exported row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RowKey {
    pub row_id: u32,
    pub subrow_id: Option<u16>,
}

impl RowKey {
    pub fn row(row_id: u32) -> Self {
        Self {
            row_id,
            subrow_id: None,
        }
    }

    pub fn subrow(row_id: u32, subrow_id: u16) -> Self {
        Self {
            row_id,
            subrow_id: Some(subrow_id),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subrow_id {
            Some(sub) => write!(f, "{}.{}", self.row_id, sub),
            None => write!(f, "{}", self.row_id),
        }
    }
}

/// Last segment of a hierarchical sheet name (`quest/000/Foo` -> `Foo`).
pub fn sheet_base_name(sheet: &str) -> &str {
    sheet.rsplit('/').next().unwrap_or(sheet)
}
