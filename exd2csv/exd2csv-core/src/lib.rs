//! Archive-agnostic core types and collaborator contracts for `exd2csv`.
//!
//! This crate provides the sheet data model ([`SheetHeader`] / [`DataPage`] /
//! [`ColumnDefinition`]), the schema tree ([`SchemaField`]) and the traits
//! through which archive readers and schema loaders plug into the exporter.

mod column;
mod error;
mod language;
mod schema;
mod sheet;
mod source;
mod text;

pub use column::{ColumnDefinition, ColumnType};
pub use error::SourceError;
pub use language::{DEFAULT_FALLBACK_LANGUAGE, Language, ParseLanguageError};
pub use schema::{SchemaField, SchemaSet, SheetSchema};
pub use sheet::{
    DataPage, DataPageDef, ROW_PROLOGUE_SIZE, RowKey, RowPointer, SheetHeader, SheetVariant,
    sheet_base_name,
};
pub use source::{SchemaLoader, SheetSource, data_page_key, header_key};
pub use text::{TextDecoder, Utf8TextDecoder};
