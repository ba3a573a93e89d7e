// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lopdf-backed document store: the loaded inputs plus the output being built.

use std::path::Path;

use pdfpipe_core::PipeConfig;
use pdfpipe_core::error::{PdfPipeError, Result};
use pdfpipe_core::store::{DocumentStore, OutputSink};
use pdfpipe_core::types::{PageReference, RotationMap};
use tracing::{info, instrument};

use crate::pdf::{ObjectMap, PdfReader, PdfWriter};

/// Input documents in load order, and the output document assembled from
/// them.
pub struct PdfStore {
    inputs: Vec<PdfReader>,
    /// One object map per input, so resources shared between pages of the
    /// same input are copied only once.
    copied: Vec<ObjectMap>,
    output: PdfWriter,
}

impl PdfStore {
    pub fn new(inputs: Vec<PdfReader>, config: &PipeConfig) -> Self {
        let copied = inputs.iter().map(|_| ObjectMap::new()).collect();
        Self {
            inputs,
            copied,
            output: PdfWriter::new(config),
        }
    }

    /// Open every input path in order. The first failure aborts loading.
    #[instrument(skip_all, fields(inputs = paths.len()))]
    pub fn open<P: AsRef<Path>>(paths: &[P], config: &PipeConfig) -> Result<Self> {
        let inputs = paths
            .iter()
            .map(|path| PdfReader::open(path))
            .collect::<Result<Vec<_>>>()?;
        info!(documents = inputs.len(), "Inputs loaded");
        Ok(Self::new(inputs, config))
    }

    pub fn inputs(&self) -> &[PdfReader] {
        &self.inputs
    }

    pub fn output(&self) -> &PdfWriter {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut PdfWriter {
        &mut self.output
    }

    fn check_reference(&self, reference: &PageReference) -> Result<()> {
        let input = self
            .inputs
            .get(reference.document)
            .ok_or(PdfPipeError::DocumentOutOfRange {
                index: reference.document,
                available: self.inputs.len(),
            })?;
        if reference.page >= input.page_count() {
            return Err(PdfPipeError::Pdf(format!(
                "page {} not found in {} ({} pages)",
                reference.page + 1,
                input.name(),
                input.page_count()
            )));
        }
        Ok(())
    }
}

impl DocumentStore for PdfStore {
    fn document_count(&self) -> usize {
        self.inputs.len()
    }

    fn page_count(&self, document: usize) -> Result<usize> {
        self.inputs
            .get(document)
            .map(PdfReader::page_count)
            .ok_or(PdfPipeError::DocumentOutOfRange {
                index: document,
                available: self.inputs.len(),
            })
    }
}

impl OutputSink for PdfStore {
    #[instrument(skip_all, fields(pages = pages.len()))]
    fn assemble(&mut self, pages: &[PageReference]) -> Result<usize> {
        // Validate up front so a bad reference never leaves a half-built
        // output behind.
        for reference in pages {
            self.check_reference(reference)?;
        }
        for reference in pages {
            let input = &self.inputs[reference.document];
            let copied = &mut self.copied[reference.document];
            self.output.append_page(input, reference.page, copied)?;
        }
        Ok(self.output.page_count())
    }

    #[instrument(skip_all, fields(pages = rotations.len()))]
    fn apply_rotation(&mut self, rotations: &RotationMap) -> Result<()> {
        for (page, rotation) in rotations.iter() {
            self.output.rotate_page(page, rotation)?;
        }
        Ok(())
    }
}
