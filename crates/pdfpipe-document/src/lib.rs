// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfpipe-document — the lopdf-backed document store for pdfpipe.
//
// Loads input PDFs, copies the pages a structure specification selects into a
// new document, rotates them, and writes the result with fresh /Info
// metadata.

pub mod paths;
pub mod pdf;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the primary structs so callers can use `pdfpipe_document::PdfStore` etc.
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
pub use store::PdfStore;
