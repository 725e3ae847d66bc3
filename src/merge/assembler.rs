//! lopdf-backed implementation of the merge capability.
//!
//! The assembler keeps a working document that grows with every submission:
//! the first PDF becomes the base, and each following PDF is renumbered past
//! the current maximum object id, folded into the base's object table, and
//! its pages appended to the base page tree. Finalization compresses and
//! renumbers the result and serializes it on a blocking task so the async
//! runtime is never starved by PDF encoding.

use lopdf::{Document, Object, ObjectId};
use tokio::task;

use crate::error::{PdfTrayError, Result};
use crate::merge::MergeBackend;
use crate::selection::Candidate;

/// Merge backend that assembles PDFs with `lopdf`.
///
/// # Examples
///
/// ```no_run
/// use pdftray::merge::{DocumentAssembler, MergeBackend};
/// use pdftray::selection::Candidate;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut assembler = DocumentAssembler::new();
/// assembler.add(&Candidate::from_path("a.pdf")).await?;
/// assembler.add(&Candidate::from_path("b.pdf")).await?;
/// let merged = assembler.save().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    /// Working document; `None` until the first add, and again after save.
    merged: Option<Document>,

    /// Highest object id in the working document.
    max_id: u32,

    /// Number of files folded in so far.
    files_added: usize,
}

impl DocumentAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files added since creation.
    pub fn files_added(&self) -> usize {
        self.files_added
    }

    /// Pages currently in the working document.
    pub fn page_count(&self) -> usize {
        self.merged
            .as_ref()
            .map(|doc| doc.get_pages().len())
            .unwrap_or(0)
    }

    /// Fold a parsed document into the working document.
    fn absorb(&mut self, doc: Document) -> Result<()> {
        match &mut self.merged {
            None => {
                self.max_id = doc.max_id;
                self.merged = Some(doc);
            }
            Some(base) => {
                let mut doc = doc;

                // Renumber to avoid object id collisions with the base.
                doc.renumber_objects_with(self.max_id + 1);
                self.max_id = doc.max_id;

                let new_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

                base.objects.extend(doc.objects);
                append_pages(base, &new_pages)?;
            }
        }

        self.files_added += 1;
        Ok(())
    }
}

impl MergeBackend for DocumentAssembler {
    async fn add(&mut self, file: &Candidate) -> Result<()> {
        let bytes = file.read().await?;

        let doc =
            Document::load_mem(&bytes).map_err(|e| classify_load_error(file.name(), &e))?;

        if doc.get_pages().is_empty() {
            return Err(PdfTrayError::corrupted_pdf(file.name(), "PDF has no pages"));
        }

        self.absorb(doc)
    }

    async fn save(&mut self) -> Result<Vec<u8>> {
        let mut doc = self.merged.take().ok_or(PdfTrayError::NothingToSave)?;

        let bytes = task::spawn_blocking(move || -> Result<Vec<u8>> {
            doc.compress();
            doc.renumber_objects();

            let mut buffer = Vec::new();
            doc.save_to(&mut buffer).map_err(|e| {
                PdfTrayError::merge_failed(format!("Failed to serialize merged document: {e}"))
            })?;

            Ok(buffer)
        })
        .await
        .map_err(|e| PdfTrayError::merge_failed(format!("Finalize task failed: {e}")))??;

        Ok(bytes)
    }
}

/// Map a parse failure to the user-facing error taxonomy.
fn classify_load_error(name: &str, err: &lopdf::Error) -> PdfTrayError {
    let msg = err.to_string();
    if msg.contains("encrypt") || msg.contains("password") {
        PdfTrayError::encrypted_pdf(name)
    } else {
        PdfTrayError::failed_to_load_pdf(name, msg)
    }
}

/// Append page references to the working document's page tree.
fn append_pages(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let catalog = merged
        .catalog_mut()
        .map_err(|e| PdfTrayError::merge_failed(format!("Failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| {
            PdfTrayError::merge_failed(format!("Failed to get pages reference: {e}"))
        })?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| PdfTrayError::merge_failed(format!("Failed to get pages object: {e}")))?;

    let Object::Dictionary(dict) = pages_dict else {
        return Err(PdfTrayError::merge_failed(
            "Pages object is not a dictionary",
        ));
    };

    let kids = dict
        .get_mut(b"Kids")
        .map_err(|_| PdfTrayError::merge_failed("Pages dictionary missing Kids array"))?;

    let Object::Array(kids_array) = kids else {
        return Err(PdfTrayError::merge_failed("Kids is not an array"));
    };

    for &page_id in page_ids {
        kids_array.push(Object::Reference(page_id));
    }

    let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
