//! Expanding user input into staged candidates.
//!
//! This is the file-picker boundary: the user hands over literal paths, glob
//! patterns, or directories, and gets back candidates ready to stage. The
//! `.pdf` extension filter is advisory, mirroring a picker dialog's file
//! type hint: glob and directory expansion only collect PDFs (everything
//! else is reported as skipped), while an explicitly named file is always
//! accepted — the selection logic itself never rejects by extension.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PdfTrayError, Result};
use crate::selection::Candidate;

/// Outcome of expanding picker input.
#[derive(Debug, Default)]
pub struct PickedFiles {
    /// Candidates ready to be staged, in expansion order.
    pub files: Vec<Candidate>,

    /// Matches that were passed over by the advisory extension filter.
    pub skipped: Vec<PathBuf>,
}

impl PickedFiles {
    /// Check whether expansion produced neither candidates nor skips.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.skipped.is_empty()
    }
}

/// Check whether a path carries the `.pdf` extension.
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Expand paths, glob patterns, and directories into candidates.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// - An existing file is staged as-is, whatever its extension.
/// - An existing directory is walked recursively; PDFs inside are staged
///   in path order.
/// - Anything else is treated as a glob pattern; non-PDF matches are
///   recorded in [`PickedFiles::skipped`].
///
/// # Errors
///
/// Propagates glob parse errors and filesystem errors from expansion. A
/// pattern with zero matches is not an error; the caller decides how to
/// report an empty pick.
pub fn pick_files<T>(inputs: T) -> Result<PickedFiles>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut picked = PickedFiles::default();

    for input in inputs {
        let input = input.as_ref();
        let path = Path::new(input);

        if path.is_file() {
            picked.files.push(Candidate::from_path(path));
        } else if path.is_dir() {
            collect_dir(path, &mut picked)?;
        } else {
            collect_pattern(input, &mut picked)?;
        }
    }

    Ok(picked)
}

/// Stage every PDF under `dir`, in path order.
fn collect_dir(dir: &Path, picked: &mut PickedFiles) -> Result<()> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| PdfTrayError::Other {
            message: err.to_string(),
        })?;

        if entry.file_type().is_file() && is_pdf_path(entry.path()) {
            found.push(entry.into_path());
        }
    }

    picked
        .files
        .extend(found.into_iter().map(Candidate::from_path));
    Ok(())
}

/// Expand a single glob pattern, staging PDF matches.
fn collect_pattern(pattern: &str, picked: &mut PickedFiles) -> Result<()> {
    let paths = glob::glob(pattern).map_err(|err| PdfTrayError::Other {
        message: err.to_string(),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfTrayError::Other {
            message: err.to_string(),
        })?;

        if !path.is_file() {
            continue;
        }

        if is_pdf_path(&path) {
            picked.files.push(Candidate::from_path(path));
        } else {
            picked.skipped.push(path);
        }
    }

    Ok(())
}
