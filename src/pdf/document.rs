//! Loaded PDF documents and page-level surgery.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use lopdf::{Document, ObjectId};

use crate::error::{Error, Result};
use crate::model::PageRange;

/// A PDF loaded from disk.
pub struct PdfFile {
    path: PathBuf,
    doc: Document,
}

impl PdfFile {
    /// Load a PDF, rejecting missing files, unparsable data and empty documents.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let file = Self {
            path: path.to_path_buf(),
            doc,
        };
        if file.page_count() == 0 {
            return Err(Error::EmptyDocument);
        }

        log::debug!("Loaded {} ({} pages)", path.display(), file.page_count());
        Ok(file)
    }

    /// Wrap a document built in memory
    pub fn from_document(path: impl Into<PathBuf>, doc: Document) -> Self {
        Self {
            path: path.into(),
            doc,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Page object ids in page order, paired with their 1-based ordinal
    pub fn pages(&self) -> Vec<(u32, ObjectId)> {
        self.doc.get_pages().into_iter().collect()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Build a new document containing exactly the pages of `range`, in order.
    pub fn extract_range(&self, range: PageRange) -> Document {
        let mut part = self.doc.clone();
        let others: Vec<u32> = (1..=self.page_count())
            .filter(|page| !range.contains(*page))
            .collect();

        if !others.is_empty() {
            part.delete_pages(&others);
            part.prune_objects();
        }
        part
    }

    /// Serialize the current state
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        save_to_bytes(&mut self.doc)
    }
}

/// Serialize a document to bytes.
pub fn save_to_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut output = Cursor::new(Vec::new());
    doc.save_to(&mut output)
        .map_err(|e| Error::Save(e.into()))?;
    Ok(output.into_inner())
}
