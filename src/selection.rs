//! The staged selection of files waiting to be merged.
//!
//! [`Selection`] is the ordered list of user-chosen [`Candidate`]s. It has no
//! I/O of its own: adding and removing files only mutates the in-memory list,
//! and file bytes are read lazily when a candidate is submitted to the merge
//! backend.
//!
//! # Examples
//!
//! ```
//! use pdftray::selection::{Candidate, Selection};
//!
//! let mut selection = Selection::new();
//! selection.add_files([
//!     Candidate::from_path("a.pdf"),
//!     Candidate::from_path("b.pdf"),
//! ]);
//! assert_eq!(selection.len(), 2);
//!
//! selection.remove_file(0);
//! assert_eq!(selection.names(), vec!["b.pdf"]);
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PdfTrayError, Result};

/// Where a candidate's bytes come from.
#[derive(Debug, Clone)]
enum CandidateSource {
    /// A file on disk; bytes are read when the candidate is submitted.
    Path(PathBuf),
    /// Bytes already held in memory.
    Memory(Vec<u8>),
}

/// One user-selected file awaiting merge.
///
/// A candidate pairs a display name with a content handle. For path-backed
/// candidates the bytes are not touched until [`Candidate::read`] is called,
/// so staging a file is always cheap and infallible.
#[derive(Debug, Clone)]
pub struct Candidate {
    name: String,
    source: CandidateSource,
}

impl Candidate {
    /// Create a candidate backed by a file on disk.
    ///
    /// The display name is the path's final component, falling back to the
    /// full path text when there is none.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self {
            name,
            source: CandidateSource::Path(path),
        }
    }

    /// Create a candidate from bytes already in memory.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: CandidateSource::Memory(bytes),
        }
    }

    /// The display name shown to the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing path, if this candidate lives on disk.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            CandidateSource::Path(path) => Some(path),
            CandidateSource::Memory(_) => None,
        }
    }

    /// Read the candidate's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfTrayError::FileNotAccessible`] if a path-backed candidate
    /// cannot be read.
    pub async fn read(&self) -> Result<Vec<u8>> {
        match &self.source {
            CandidateSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| PdfTrayError::FileNotAccessible {
                        path: path.clone(),
                        source: e,
                    })
            }
            CandidateSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }

    /// Size of the candidate in bytes, if cheaply known.
    ///
    /// Path-backed candidates are stat'ed; a missing or unreadable file
    /// yields `None` rather than an error, since size is display-only.
    pub async fn size(&self) -> Option<u64> {
        match &self.source {
            CandidateSource::Path(path) => {
                tokio::fs::metadata(path).await.map(|m| m.len()).ok()
            }
            CandidateSource::Memory(bytes) => Some(bytes.len() as u64),
        }
    }
}

/// A single row in a selection snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntry {
    /// Zero-based position in the selection.
    pub index: usize,

    /// Display name of the staged file.
    pub name: String,

    /// Backing path, when the candidate lives on disk.
    pub path: Option<PathBuf>,
}

/// The ordered list of staged candidates.
///
/// Insertion order is preserved and duplicates are permitted; the list is
/// mutated only through [`add_files`](Self::add_files),
/// [`remove_file`](Self::remove_file) and [`clear`](Self::clear).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    files: Vec<Candidate>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files, in the given order, to the end of the selection.
    ///
    /// No deduplication and no content validation happen here; staging
    /// always succeeds.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = Candidate>) {
        self.files.extend(files);
    }

    /// Remove the file at `index`, preserving the order of the rest.
    ///
    /// An out-of-range index is a no-op returning `None`.
    pub fn remove_file(&mut self, index: usize) -> Option<Candidate> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    /// Number of files currently staged.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drop every staged file.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// The candidate at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.files.get(index)
    }

    /// Iterate over the staged candidates in order.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.files.iter()
    }

    /// Display names of all staged files, in order.
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name()).collect()
    }

    /// Serializable snapshot of the selection for display layers.
    pub fn snapshot(&self) -> Vec<SelectionEntry> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| SelectionEntry {
                index,
                name: file.name().to_string(),
                path: file.path().map(Path::to_path_buf),
            })
            .collect()
    }

    /// Sizes of all staged files, in order.
    ///
    /// Stats run with bounded concurrency; results keep selection order.
    /// Entries whose size cannot be determined are `None`.
    pub async fn sizes(&self) -> Vec<Option<u64>> {
        use futures::stream::{self, StreamExt};

        stream::iter(self.files.iter())
            .map(|file| file.size())
            .buffered(8)
            .collect()
            .await
    }
}
