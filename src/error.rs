//! Error types for pdftray.
//!
//! Errors fall into three user-visible groups:
//!
//! - **Validation notices**: the user asked for a merge that cannot start
//!   (too few files staged, merge already running). Nothing is mutated.
//! - **Capability failures**: the merge backend or the artifact delivery
//!   failed mid-flight. The staged selection is kept so the user can retry.
//! - **Everything else**: configuration and I/O problems surfaced before a
//!   merge is attempted.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pdftray operations.
pub type Result<T> = std::result::Result<T, PdfTrayError>;

/// Main error type for pdftray operations.
#[derive(Debug, Error)]
pub enum PdfTrayError {
    /// Merge was triggered with fewer than two staged files.
    #[error("Please select at least 2 PDF files to merge ({count} staged)")]
    SelectionTooSmall {
        /// Number of files staged at trigger time.
        count: usize,
    },

    /// Merge was triggered while another merge is still running.
    #[error("A merge is already in progress")]
    MergeInProgress,

    /// A staged file could not be read.
    #[error("Cannot read file: {}\n  Reason: {}", .path.display(), .source)]
    FileNotAccessible {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The backend could not parse a submitted file as a PDF.
    #[error("Failed to load PDF: {name}\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Display name of the file.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A submitted PDF has an invalid or unusable structure.
    #[error("Corrupted or invalid PDF: {name}\n  Details: {details}")]
    CorruptedPdf {
        /// Display name of the file.
        name: String,
        /// Details about the corruption.
        details: String,
    },

    /// A submitted PDF is encrypted and cannot be merged.
    #[error(
        "PDF is encrypted and cannot be merged: {name}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools"
    )]
    EncryptedPdf {
        /// Display name of the file.
        name: String,
    },

    /// The merge backend failed while combining or finalizing documents.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Finalization was requested before any document was added.
    #[error("Nothing has been added to the merger")]
    NothingToSave,

    /// The merged artifact's output file could not be created.
    #[error("Failed to create output file: {}\n  Reason: {}", .path.display(), .source)]
    FailedToCreateOutput {
        /// Path where the output should have been created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The merged artifact could not be written out.
    #[error("Failed to write output file: {}\n  Reason: {}", .path.display(), .source)]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid runtime configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfTrayError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl From<anyhow::Error> for PdfTrayError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfTrayError {
    /// Create a SelectionTooSmall error.
    pub fn selection_too_small(count: usize) -> Self {
        Self::SelectionTooSmall { count }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(name: impl Into<String>) -> Self {
        Self::EncryptedPdf { name: name.into() }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is a pre-merge validation notice.
    ///
    /// Validation notices decline to start a merge without mutating any
    /// state; the view layer reports them as warnings rather than failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::SelectionTooSmall { .. } | Self::MergeInProgress)
    }

    /// Check if this error came from the merge capability or the delivery.
    ///
    /// Capability failures abort an in-flight merge but leave the staged
    /// selection intact so the user can retry after removing the offender.
    pub fn is_capability(&self) -> bool {
        matches!(
            self,
            Self::FileNotAccessible { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::MergeFailed { .. }
                | Self::NothingToSave
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::Io { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SelectionTooSmall { .. } => 1,
            Self::MergeInProgress => 1,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::MergeFailed { .. } => 6,
            Self::NothingToSave => 6,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
