//! Caches shared by export workers.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::{DashMap, DashSet, mapref::entry::Entry};
use exd2csv_core::{SchemaLoader, SchemaSet, SourceError};

/// Output directories already created during this run.
#[derive(Debug, Default)]
pub struct DirectoryCache {
    created: DashSet<PathBuf>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `dir` and its parents unless already done.
    ///
    /// Safe to call from several workers at once; a directory that appears
    /// concurrently is not an error.
    pub fn ensure(&self, dir: &Path) -> io::Result<()> {
        if self.created.contains(dir) {
            return Ok(());
        }
        fs::create_dir_all(dir)?;
        if self.created.insert(dir.to_path_buf()) {
            tracing::debug!(dir = %dir.display(), "created output directory");
        }
        Ok(())
    }

    /// Forget every recorded directory, e.g. after the output tree was removed.
    pub fn clear(&self) {
        self.created.clear();
    }

    pub fn len(&self) -> usize {
        self.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }
}

/// Schema sets keyed by schema version (case-insensitive).
///
/// Each version is loaded at most once; concurrent first requests wait for
/// the single load and share its result.
#[derive(Debug, Default)]
pub struct SchemaCache {
    sets: DashMap<String, Arc<SchemaSet>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached set for `version`, loading it with `loader` first if needed.
    ///
    /// A failed load caches nothing. `loader` must not call back into this cache.
    pub fn get_or_load<L: SchemaLoader + ?Sized>(
        &self,
        version: &str,
        loader: &L,
    ) -> Result<Arc<SchemaSet>, SourceError> {
        let key = version.to_lowercase();
        if let Some(set) = self.sets.get(&key) {
            return Ok(Arc::clone(set.value()));
        }

        match self.sets.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                tracing::debug!(version, "loading schema set");
                let set = Arc::new(loader.load_schemas(version)?);
                entry.insert(Arc::clone(&set));
                Ok(set)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
