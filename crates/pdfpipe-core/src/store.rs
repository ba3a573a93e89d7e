// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Trait definitions for the document store the resolvers run against.
//
// The resolvers only ever see page counts. Loading, copying pages, and
// rotating them belongs to an implementation of these traits (the lopdf
// backed one lives in `pdfpipe-document`).

use crate::error::Result;
use crate::types::{PageReference, RotationMap};

/// Read-only view of the loaded input documents.
pub trait DocumentStore {
    /// Number of loaded input documents.
    fn document_count(&self) -> usize;

    /// Page count of the document at the 0-based `document` index.
    fn page_count(&self, document: usize) -> Result<usize>;

    /// Page counts of every loaded document, in load order.
    fn page_counts(&self) -> Result<Vec<usize>> {
        (0..self.document_count())
            .map(|document| self.page_count(document))
            .collect()
    }
}

/// The output document being assembled.
pub trait OutputSink {
    /// Copy the referenced pages, in order, into the output. Returns the
    /// resulting output page count.
    fn assemble(&mut self, pages: &[PageReference]) -> Result<usize>;

    /// Rotate already assembled output pages.
    fn apply_rotation(&mut self, rotations: &RotationMap) -> Result<()>;
}
