//! pdftray - Stage PDF files and merge them into a single document.
//!
//! This library implements an interactive merge workflow: the user stages an
//! ordered selection of PDF files, triggers a merge, and receives a single
//! combined document delivered under the fixed name `merged.pdf`. It
//! provides:
//!
//! - An ordered, mutable selection of staged files
//! - A controller that owns the workflow state and guards re-entrancy
//! - A pluggable merge capability, with an `lopdf`-backed implementation
//! - A pluggable artifact delivery, with an atomic directory writer
//! - Path, glob, and directory expansion for staging input
//!
//! # Examples
//!
//! ```no_run
//! use pdftray::controller::MergeController;
//! use pdftray::io::DirectoryDelivery;
//! use pdftray::merge::DocumentAssembler;
//! use pdftray::selection::Candidate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = MergeController::new();
//! controller.add_files([
//!     Candidate::from_path("report.pdf"),
//!     Candidate::from_path("appendix.pdf"),
//! ]);
//!
//! let mut backend = DocumentAssembler::new();
//! let delivery = DirectoryDelivery::new("downloads");
//!
//! let report = controller.merge_all(&mut backend, &delivery).await?;
//! println!(
//!     "Merged {} files into {}",
//!     report.files_merged,
//!     report.output_path.display()
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod controller;
pub mod error;
pub mod io;
pub mod logging;
pub mod merge;
pub mod output;
pub mod selection;

// Re-export commonly used types
pub use controller::{MIN_MERGE_FILES, MergeController, MergeReport};
pub use error::{PdfTrayError, Result};
pub use selection::{Candidate, Selection};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
