//! Input and output boundaries.
//!
//! [`picker`] expands user-given paths, globs, and directories into staged
//! candidates (the file-picker boundary); [`delivery`] saves the merged
//! artifact under its fixed name (the download boundary).

pub mod delivery;
pub mod picker;

pub use delivery::{Delivery, DirectoryDelivery, MergedArtifact, MERGED_FILENAME, PDF_MIME};
pub use picker::{pick_files, PickedFiles};
