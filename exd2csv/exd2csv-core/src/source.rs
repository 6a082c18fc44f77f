//! Contracts for the collaborators that feed the exporter.

use crate::{
    error::SourceError,
    language::Language,
    schema::SchemaSet,
    sheet::{DataPage, SheetHeader},
};

/// Archive reader that resolves sheet names to headers and data pages.
///
/// Implementations are shared by every export worker.
pub trait SheetSource: Send + Sync {
    /// Names of every sheet the archive knows about, in archive order.
    fn sheet_names(&self) -> Result<Vec<String>, SourceError>;

    /// Read the header of `sheet`.
    fn header(&self, sheet: &str) -> Result<SheetHeader, SourceError>;

    /// Read the page of `sheet` starting at `start_id` for `language`.
    ///
    /// Returns `Ok(None)` when the archive has no such page, which is normal
    /// for languages a sheet is not localized into.
    fn data_page(
        &self,
        sheet: &str,
        start_id: u32,
        language: Language,
    ) -> Result<Option<DataPage>, SourceError>;
}

/// Loader that turns one schema version into a [`SchemaSet`].
pub trait SchemaLoader: Send + Sync {
    fn load_schemas(&self, version: &str) -> Result<SchemaSet, SourceError>;
}

/// Archive key of a sheet header (`exd/{sheet}.exh`).
pub fn header_key(sheet: &str) -> String {
    format!("exd/{sheet}.exh")
}

/// Archive key of a data page (`exd/{sheet}_{start}[_{lang}].exd`).
pub fn data_page_key(sheet: &str, start_id: u32, language: Language) -> String {
    match language {
        Language::None => format!("exd/{sheet}_{start_id}.exd"),
        lang => format!("exd/{sheet}_{start_id}_{}.exd", lang.code()),
    }
}
