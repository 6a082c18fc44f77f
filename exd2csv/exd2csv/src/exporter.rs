//! Sheet export orchestration.

use std::{
    any::Any,
    io::{BufWriter, IntoInnerError, Write},
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    time::Instant,
};

use exd2csv_core::{
    SchemaLoader, SchemaSet, SheetSchema, SheetSource, SourceError, TextDecoder,
    sheet_base_name,
};
use exd2csv_schema::bind_columns;
use rayon::{ThreadPoolBuilder, prelude::*};

use crate::{
    cache::{DirectoryCache, SchemaCache},
    csv::UTF8_BOM,
    error::ExportError,
    options::ExportOptions,
    output::{PrepareOutcome, prepare_output_dir},
    serializer::{SheetLayout, SheetSerializer},
    summary::{ExportSummary, SheetFailure, SheetReport},
};

const BUFFER_SIZE: usize = 64 * 1024;

/// Exports sheets from a [`SheetSource`] as CSV files.
pub struct Exporter<S> {
    source: S,
    options: ExportOptions,
    dirs: DirectoryCache,
    schemas: SchemaCache,
}

impl<S: SheetSource> Exporter<S> {
    pub fn new(source: S, options: ExportOptions) -> Self {
        Self {
            source,
            options,
            dirs: DirectoryCache::new(),
            schemas: SchemaCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Schema sets loaded so far by [`Exporter::export_version`].
    pub fn schemas(&self) -> &SchemaCache {
        &self.schemas
    }

    /// `{output_dir}/{sheet}.csv`, with `/` in hierarchical names mapped to
    /// path separators.
    pub fn output_path(&self, sheet: &str) -> PathBuf {
        let mut path = self.options.output_dir.clone();
        path.extend(sheet.split('/'));
        let mut file = path.into_os_string();
        file.push(".csv");
        PathBuf::from(file)
    }

    /// Create the output directory and clear it according to the configured
    /// [`ClearPolicy`](crate::ClearPolicy).
    pub fn prepare_output(&self) -> std::io::Result<PrepareOutcome> {
        let clear = self
            .options
            .clear_policy
            .should_clear(self.options.is_partial());
        let outcome = prepare_output_dir(
            &self.options.output_dir,
            clear,
            self.options.allow_foreign_files,
        )?;
        if matches!(outcome, PrepareOutcome::Cleared { .. }) {
            self.dirs.clear();
        }
        Ok(outcome)
    }

    /// Export one sheet using `text` for its string cells.
    ///
    /// The CSV is written to a temporary file next to its destination and
    /// only moved into place once every row has been written.
    pub fn export_sheet<D: TextDecoder + ?Sized>(
        &self,
        sheet: &str,
        schema: Option<&SheetSchema>,
        text: &mut D,
    ) -> Result<SheetReport, ExportError> {
        let header = self
            .source
            .header(sheet)
            .map_err(|source| ExportError::Header {
                sheet: sheet.to_string(),
                source,
            })?;
        let language = header.resolve_language(self.options.language);
        tracing::debug!(
            sheet,
            requested = ?self.options.language,
            resolved = ?language,
            "resolved sheet language"
        );

        let path = self.output_path(sheet);
        let dir = path.parent().unwrap_or(&self.options.output_dir);
        self.dirs.ensure(dir)?;

        let columns = bind_columns(&header.columns, schema);
        let layout = SheetLayout {
            sheet,
            header: &header,
            columns: &columns,
            silent: self.options.is_silent(sheet),
        };

        let mut file = tempfile::Builder::new()
            .prefix(".exd2csv-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        let mut dest = BufWriter::with_capacity(BUFFER_SIZE, file.as_file_mut());
        dest.write_all(UTF8_BOM)?;

        let mut serializer = SheetSerializer::start(layout, text, dest)?;
        for page in &header.pages {
            let data_page = self
                .source
                .data_page(sheet, page.start_id, language)
                .map_err(|source| ExportError::DataPage {
                    sheet: sheet.to_string(),
                    start_id: page.start_id,
                    language,
                    source,
                })?;
            match data_page {
                Some(data_page) => serializer.write_page(&data_page)?,
                None => tracing::debug!(
                    sheet,
                    start_id = page.start_id,
                    language = ?language,
                    "data page not available, skipping"
                ),
            }
        }
        let (dest, rows) = serializer.finish()?;
        dest.into_inner().map_err(IntoInnerError::into_error)?;

        file.persist(&path).map_err(|err| ExportError::Persist {
            path: path.display().to_string(),
            source: err.error,
        })?;

        Ok(SheetReport {
            sheet: sheet.to_string(),
            path,
            language,
            rows,
            has_schema: schema.is_some(),
        })
    }

    /// Export `sheets` concurrently, looking up each sheet's schema in
    /// `schemas` by base name.
    ///
    /// Every worker builds its own decoder with `make_decoder` and reuses it
    /// for all sheets it handles. A failing sheet is recorded in the summary
    /// and never stops the others.
    pub fn export_sheets<D, F>(
        &self,
        sheets: &[String],
        schemas: &SchemaSet,
        make_decoder: F,
    ) -> ExportSummary
    where
        D: TextDecoder,
        F: Fn() -> D + Send + Sync,
    {
        let started = Instant::now();
        let threads = self.options.effective_parallelism();
        tracing::debug!(sheets = sheets.len(), threads, "exporting sheets");

        let outcomes: Vec<Result<SheetReport, SheetFailure>> =
            match ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| {
                    sheets
                        .par_iter()
                        .map_init(&make_decoder, |text, sheet| {
                            self.export_isolated(sheet, schemas, text)
                        })
                        .collect()
                }),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to build worker pool, exporting sequentially");
                    let mut text = make_decoder();
                    sheets
                        .iter()
                        .map(|sheet| self.export_isolated(sheet, schemas, &mut text))
                        .collect()
                }
            };

        let mut summary = ExportSummary {
            attempted: sheets.len(),
            failure_detail_limit: self.options.failure_detail_limit,
            ..ExportSummary::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(report) => {
                    summary.succeeded += 1;
                    if report.has_schema {
                        summary.with_schema += 1;
                    }
                }
                Err(failure) => summary.failures.push(failure),
            }
        }
        summary.elapsed = started.elapsed();

        tracing::info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed(),
            with_schema = summary.with_schema,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "export finished"
        );
        summary
    }

    /// List every sheet of the source, apply the configured filter and export
    /// the selection.
    pub fn export_all<D, F>(
        &self,
        schemas: &SchemaSet,
        make_decoder: F,
    ) -> Result<ExportSummary, SourceError>
    where
        D: TextDecoder,
        F: Fn() -> D + Send + Sync,
    {
        let all = self.source.sheet_names()?;
        let selected = select_sheets(&all, &self.options.filters);
        tracing::debug!(total = all.len(), selected = selected.len(), "selected sheets");
        Ok(self.export_sheets(&selected, schemas, make_decoder))
    }

    /// Like [`Exporter::export_all`], naming columns from the schema set of
    /// `version`. The set is loaded through `loader` on first use and cached
    /// by this exporter for later runs.
    pub fn export_version<L, D, F>(
        &self,
        version: &str,
        loader: &L,
        make_decoder: F,
    ) -> Result<ExportSummary, SourceError>
    where
        L: SchemaLoader + ?Sized,
        D: TextDecoder,
        F: Fn() -> D + Send + Sync,
    {
        let schemas = self.schemas.get_or_load(version, loader)?;
        self.export_all(&schemas, make_decoder)
    }

    /// Export one sheet, turning both errors and panics into a [`SheetFailure`].
    fn export_isolated<D: TextDecoder>(
        &self,
        sheet: &str,
        schemas: &SchemaSet,
        text: &mut D,
    ) -> Result<SheetReport, SheetFailure> {
        let schema = schemas.get(sheet_base_name(sheet));
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.export_sheet(sheet, schema, text)
        }));

        let message = match result {
            Ok(Ok(report)) => return Ok(report),
            Ok(Err(err)) => err.to_string(),
            Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        };
        tracing::debug!(sheet, error = %message, "sheet export failed");
        Err(SheetFailure {
            sheet: sheet.to_string(),
            message,
        })
    }
}

/// Keep the sheets of `all` that match one of `filters` (ASCII
/// case-insensitive), in their original order. No filters keeps everything.
pub fn select_sheets(all: &[String], filters: &[String]) -> Vec<String> {
    if filters.is_empty() {
        return all.to_vec();
    }
    all.iter()
        .filter(|sheet| filters.iter().any(|f| sheet.eq_ignore_ascii_case(f)))
        .cloned()
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
