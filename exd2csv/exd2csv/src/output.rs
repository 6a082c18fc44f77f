//! Output directory preparation.

use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Foreign files listed in [`PrepareOutcome::RefusedForeignFiles`].
const FOREIGN_FILE_PREVIEW: usize = 20;

/// Whether the output directory is emptied before an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPolicy {
    Always,
    Never,
    /// Clear for full exports, keep existing files for filtered ones.
    #[default]
    Auto,
}

impl ClearPolicy {
    pub fn should_clear(self, partial_export: bool) -> bool {
        match self {
            ClearPolicy::Always => true,
            ClearPolicy::Never => false,
            ClearPolicy::Auto => !partial_export,
        }
    }
}

impl FromStr for ClearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(ClearPolicy::Always),
            "never" => Ok(ClearPolicy::Never),
            "auto" => Ok(ClearPolicy::Auto),
            other => Err(format!("unknown clear policy '{other}' (expected always | never | auto)")),
        }
    }
}

/// Result of [`prepare_output_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// Existing contents were left alone.
    Kept,
    /// Every file and sub-directory was removed.
    Cleared { removed_files: usize },
    /// Nothing was removed because the directory holds non-CSV files.
    RefusedForeignFiles {
        /// First few offending paths, relative to the directory, sorted.
        files: Vec<PathBuf>,
        total: usize,
    },
}

/// Make sure `dir` exists and, when `clear` is set, empty it.
///
/// Clearing is refused if any non-CSV file is present, unless
/// `allow_foreign_files` is set.
pub fn prepare_output_dir(
    dir: &Path,
    clear: bool,
    allow_foreign_files: bool,
) -> io::Result<PrepareOutcome> {
    fs::create_dir_all(dir)?;
    if !clear {
        return Ok(PrepareOutcome::Kept);
    }

    let mut files = Vec::new();
    collect_files(dir, &mut files)?;

    if !allow_foreign_files {
        let mut foreign: Vec<PathBuf> = files
            .iter()
            .filter(|path| !is_csv(path))
            .map(|path| path.strip_prefix(dir).unwrap_or(path).to_path_buf())
            .collect();
        if !foreign.is_empty() {
            foreign.sort();
            let total = foreign.len();
            foreign.truncate(FOREIGN_FILE_PREVIEW);
            return Ok(PrepareOutcome::RefusedForeignFiles {
                files: foreign,
                total,
            });
        }
    }

    for file in &files {
        fs::remove_file(file)?;
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        }
    }
    tracing::debug!(dir = %dir.display(), removed = files.len(), "cleared output directory");

    Ok(PrepareOutcome::Cleared {
        removed_files: files.len(),
    })
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            collect_files(&entry.path(), out)?;
        } else {
            out.push(entry.path());
        }
    }
    Ok(())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
