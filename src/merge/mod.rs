//! The merge capability boundary.
//!
//! The orchestration core treats PDF combination as an opaque, external
//! capability reached through the [`MergeBackend`] trait: an ordered
//! [`add`](MergeBackend::add) per input followed by a single
//! [`save`](MergeBackend::save) that yields the combined byte buffer. The
//! output document is the concatenation of the inputs in submission order.
//!
//! [`DocumentAssembler`] is the production implementation, built on `lopdf`.

pub mod assembler;

pub use assembler::DocumentAssembler;

use crate::error::Result;
use crate::selection::Candidate;

/// An external capability that combines documents in submission order.
///
/// Both operations may suspend (they are I/O-bound) and may fail with a
/// format or I/O error. Implementations are driven strictly sequentially;
/// there is never more than one in-flight call per backend.
#[allow(async_fn_in_trait)]
pub trait MergeBackend {
    /// Append one file's content to the working document.
    ///
    /// Submission order determines output order.
    async fn add(&mut self, file: &Candidate) -> Result<()>;

    /// Finalize the working document and return the merged byte buffer.
    ///
    /// A backend is spent after a successful save; further calls fail.
    async fn save(&mut self) -> Result<Vec<u8>>;
}
