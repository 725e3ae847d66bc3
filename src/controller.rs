//! Merge orchestration.
//!
//! [`MergeController`] is the single owner of the workflow state: the staged
//! [`Selection`] and the in-progress flag. The view layer holds a reference
//! to the controller and calls into it; no state lives outside it.
//!
//! A merge attempt moves the controller Idle → InProgress → Idle. The
//! InProgress transition happens only when at least [`MIN_MERGE_FILES`] are
//! staged and no merge is running; the return to Idle is unconditional,
//! whether the attempt succeeded or failed. On success the selection is
//! cleared; on failure it is kept so the user can retry after removing the
//! offending file.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{debug, error, info};

use crate::error::{PdfTrayError, Result};
use crate::io::delivery::{Delivery, MergedArtifact};
use crate::merge::MergeBackend;
use crate::selection::{Candidate, Selection};

/// Minimum number of staged files required to start a merge.
///
/// A single file has nothing to merge with; this is a business rule, not a
/// backend limitation.
pub const MIN_MERGE_FILES: usize = 2;

/// Statistics about a completed merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Number of files submitted to the backend.
    pub files_merged: usize,

    /// Size of the merged artifact in bytes.
    pub output_bytes: u64,

    /// Where the artifact was delivered.
    pub output_path: PathBuf,

    /// Total time for submission, finalization, and delivery.
    #[serde(serialize_with = "duration_secs")]
    pub merge_time: Duration,
}

fn duration_secs<S: Serializer>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(d.as_secs_f64())
}

/// Owner of the staged selection and the merge-in-progress flag.
///
/// # Examples
///
/// ```no_run
/// use pdftray::controller::MergeController;
/// use pdftray::io::DirectoryDelivery;
/// use pdftray::merge::DocumentAssembler;
/// use pdftray::selection::Candidate;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut controller = MergeController::new();
/// controller.add_files([
///     Candidate::from_path("a.pdf"),
///     Candidate::from_path("b.pdf"),
/// ]);
///
/// let mut backend = DocumentAssembler::new();
/// let delivery = DirectoryDelivery::new(".");
/// let report = controller.merge_all(&mut backend, &delivery).await?;
/// println!("Merged {} files", report.files_merged);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MergeController {
    selection: Selection,
    in_progress: bool,
}

impl MergeController {
    /// Create a controller with an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller around an existing selection.
    pub fn with_selection(selection: Selection) -> Self {
        Self {
            selection,
            in_progress: false,
        }
    }

    /// Stage files at the end of the selection, in the given order.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = Candidate>) {
        self.selection.add_files(files);
    }

    /// Remove the staged file at `index`; no-op when out of range.
    pub fn remove_file(&mut self, index: usize) -> Option<Candidate> {
        self.selection.remove_file(index)
    }

    /// Drop every staged file.
    pub fn clear_files(&mut self) {
        self.selection.clear();
    }

    /// Number of files currently staged.
    pub fn file_count(&self) -> usize {
        self.selection.len()
    }

    /// Read access to the staged selection for display layers.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Check whether a merge is currently running.
    ///
    /// While this returns true, the view layer keeps the merge trigger
    /// disabled; a call to [`merge_all`](Self::merge_all) in that window is
    /// rejected without touching the backend.
    pub fn is_merging(&self) -> bool {
        self.in_progress
    }

    /// Merge every staged file, in order, and deliver the result.
    ///
    /// Submits each candidate to `backend.add` strictly sequentially (output
    /// order follows submission order), finalizes with `backend.save`, and
    /// hands the artifact to `delivery`. On success the selection is cleared.
    /// On any failure the selection is left untouched and the error is
    /// logged and returned; there are no automatic retries.
    ///
    /// The in-progress flag is reset on every exit path.
    ///
    /// # Errors
    ///
    /// - [`PdfTrayError::MergeInProgress`] if a merge is already running.
    /// - [`PdfTrayError::SelectionTooSmall`] if fewer than
    ///   [`MIN_MERGE_FILES`] files are staged. Neither check touches the
    ///   backend.
    /// - Any capability or delivery error raised mid-flight.
    pub async fn merge_all<M, D>(&mut self, backend: &mut M, delivery: &D) -> Result<MergeReport>
    where
        M: MergeBackend,
        D: Delivery,
    {
        if self.in_progress {
            return Err(PdfTrayError::MergeInProgress);
        }

        let count = self.selection.len();
        if count < MIN_MERGE_FILES {
            return Err(PdfTrayError::selection_too_small(count));
        }

        self.in_progress = true;
        let outcome = drive_merge(&self.selection, backend, delivery).await;
        self.in_progress = false;

        match outcome {
            Ok(report) => {
                // Back to the initial selectable state.
                self.selection.clear();

                info!(
                    files = report.files_merged,
                    bytes = report.output_bytes,
                    "merge completed"
                );
                Ok(report)
            }
            Err(err) => {
                error!(error = %err, "merge failed; selection kept for retry");
                Err(err)
            }
        }
    }
}

/// Submit every candidate, finalize, and deliver.
async fn drive_merge<M, D>(
    selection: &Selection,
    backend: &mut M,
    delivery: &D,
) -> Result<MergeReport>
where
    M: MergeBackend,
    D: Delivery,
{
    let started = Instant::now();

    for candidate in selection.iter() {
        debug!(file = candidate.name(), "submitting to merge backend");
        backend.add(candidate).await?;
    }

    let bytes = backend.save().await?;
    let artifact = MergedArtifact::pdf(bytes);

    let output_path = delivery.deliver(&artifact).await?;

    Ok(MergeReport {
        files_merged: selection.len(),
        output_bytes: artifact.len() as u64,
        output_path,
        merge_time: started.elapsed(),
    })
}
