//! Saving the merged artifact.
//!
//! The merge workflow ends with a download-style side effect: the combined
//! byte buffer is saved under a fixed name. [`Delivery`] is that boundary;
//! [`DirectoryDelivery`] implements it with an atomic write (temp file, then
//! rename) into a target directory.
//!
//! The output filename is not configurable; every merge produces
//! [`MERGED_FILENAME`].

use std::path::{Path, PathBuf};

use crate::error::{PdfTrayError, Result};

/// Fixed name of the merged output file.
pub const MERGED_FILENAME: &str = "merged.pdf";

/// MIME type of the merged output.
pub const PDF_MIME: &str = "application/pdf";

/// The transient merged byte buffer, ready to be saved.
///
/// An artifact exists only long enough to be handed to a [`Delivery`]; it is
/// dropped as soon as the save side effect has been triggered.
#[derive(Debug)]
pub struct MergedArtifact {
    /// The merged document bytes.
    pub bytes: Vec<u8>,

    /// Filename the artifact is saved under.
    pub filename: &'static str,

    /// MIME type of the content.
    pub content_type: &'static str,
}

impl MergedArtifact {
    /// Wrap merged PDF bytes under the fixed output name.
    pub fn pdf(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            filename: MERGED_FILENAME,
            content_type: PDF_MIME,
        }
    }

    /// Size of the artifact in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether the artifact holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A side-effecting save of a merged artifact.
///
/// Returns the path the artifact landed at. May suspend and may fail with an
/// I/O error; failures are reported through the same generic notice as
/// backend failures.
#[allow(async_fn_in_trait)]
pub trait Delivery {
    /// Save the artifact and return its final location.
    async fn deliver(&self, artifact: &MergedArtifact) -> Result<PathBuf>;
}

/// Delivery that saves the artifact into a download directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash or
/// a full disk never leaves a torn `merged.pdf` behind. An existing file of
/// the same name is replaced.
///
/// # Examples
///
/// ```no_run
/// use pdftray::io::{Delivery, DirectoryDelivery, MergedArtifact};
///
/// # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
/// let delivery = DirectoryDelivery::new("downloads");
/// let path = delivery.deliver(&MergedArtifact::pdf(bytes)).await?;
/// println!("Saved to {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    /// Create a delivery targeting `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check that the target directory exists and is writable.
    ///
    /// Performs pre-flight checks without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist, is not a
    /// directory, or is read-only.
    pub async fn can_write(&self) -> Result<()> {
        let metadata =
            tokio::fs::metadata(&self.dir)
                .await
                .map_err(|e| PdfTrayError::FileNotAccessible {
                    path: self.dir.clone(),
                    source: e,
                })?;

        if !metadata.is_dir() {
            return Err(PdfTrayError::invalid_config(format!(
                "Download target is not a directory: {}",
                self.dir.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(PdfTrayError::invalid_config(format!(
                "Download directory is not writable: {}",
                self.dir.display()
            )));
        }

        Ok(())
    }
}

impl Delivery for DirectoryDelivery {
    async fn deliver(&self, artifact: &MergedArtifact) -> Result<PathBuf> {
        let final_path = self.dir.join(artifact.filename);
        let tmp_path = final_path.with_extension("tmp");

        tokio::fs::write(&tmp_path, &artifact.bytes)
            .await
            .map_err(|e| PdfTrayError::FailedToCreateOutput {
                path: tmp_path.clone(),
                source: e,
            })?;

        tokio::fs::rename(&tmp_path, &final_path)
            .await
            .map_err(|e| PdfTrayError::FailedToWrite {
                path: final_path.clone(),
                source: e,
            })?;

        Ok(final_path)
    }
}
