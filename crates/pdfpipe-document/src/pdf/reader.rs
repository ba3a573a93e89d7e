// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open input documents and expose their page tree using the
// `lopdf` crate.

use std::path::Path;

use lopdf::{Document, ObjectId};
use pdfpipe_core::error::PdfPipeError;
use tracing::{debug, info, instrument};

/// A loaded input document.
///
/// Wraps `lopdf::Document` together with its pages in page-tree order, so a
/// 0-based page index maps straight onto an object ID.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Page object IDs, first page first.
    page_ids: Vec<ObjectId>,
    /// File name used in diagnostics.
    name: String,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PdfPipeError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let name = path_ref
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_ref.display().to_string());

        let document = Document::load(path_ref)
            .map_err(|err| PdfPipeError::Pdf(format!("cannot load {}: {}", name, err)))?;

        Self::from_document(document, name)
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip(data), fields(bytes_len = data.len()))]
    pub fn from_bytes(name: &str, data: &[u8]) -> Result<Self, PdfPipeError> {
        let document = Document::load_mem(data)
            .map_err(|err| PdfPipeError::Pdf(format!("cannot load {}: {}", name, err)))?;

        Self::from_document(document, name.to_owned())
    }

    fn from_document(document: Document, name: String) -> Result<Self, PdfPipeError> {
        if document.is_encrypted() {
            return Err(PdfPipeError::ProtectedDocument { name });
        }

        // get_pages() is keyed by 1-based page number, so values come out in
        // page order.
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        debug!(name = %name, pages = page_ids.len(), "PDF loaded");

        Ok(Self {
            document,
            page_ids,
            name,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Object ID of the page at the 0-based `index`.
    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.page_ids.get(index).copied()
    }

    pub fn is_page(&self, id: ObjectId) -> bool {
        self.page_ids.contains(&id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}
