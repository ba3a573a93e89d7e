// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline — selection, assembly, then rotation against the assembled output.

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::rotation::resolve_rotation;
use crate::selection::resolve_structure;
use crate::store::{DocumentStore, OutputSink};
use crate::types::{PageReference, RotationMap};

/// What a pipeline run would produce, resolved without touching any pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub pages: Vec<PageReference>,
    pub rotations: RotationMap,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub output_pages: usize,
    pub rotated_pages: usize,
}

/// Resolve both specifications against the store without assembling.
///
/// Every selected page becomes exactly one output page, so the rotation
/// bound is the length of the selection.
pub fn plan<D, S, R>(store: &D, structure: &[S], rotation: &[R]) -> Result<Plan>
where
    D: DocumentStore + ?Sized,
    S: AsRef<str>,
    R: AsRef<str>,
{
    let page_counts = store.page_counts()?;
    let pages = resolve_structure(structure, &page_counts)?;
    let rotations = resolve_rotation(rotation, pages.len())?;
    Ok(Plan { pages, rotations })
}

/// Run the full pipeline against a store that is also the output sink.
///
/// Rotation is resolved only after assembly, against the page count the sink
/// reports. Any error leaves the caller with nothing to save.
pub fn run<P, S, R>(pipe: &mut P, structure: &[S], rotation: &[R]) -> Result<PipelineSummary>
where
    P: DocumentStore + OutputSink + ?Sized,
    S: AsRef<str>,
    R: AsRef<str>,
{
    let page_counts = pipe.page_counts()?;
    let pages = resolve_structure(structure, &page_counts)?;

    let output_pages = pipe.assemble(&pages)?;
    info!(
        documents = page_counts.len(),
        output_pages, "Output assembled"
    );

    let rotations = resolve_rotation(rotation, output_pages)?;
    if !rotations.is_empty() {
        pipe.apply_rotation(&rotations)?;
    }

    Ok(PipelineSummary {
        output_pages,
        rotated_pages: rotations.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PdfPipeError, SpecError};
    use crate::types::Rotation;

    /// In-memory store: documents are just page counts, output pages are
    /// references plus the rotation applied to them.
    #[derive(Default)]
    struct MemoryStore {
        counts: Vec<usize>,
        output: Vec<(PageReference, Option<Rotation>)>,
    }

    impl MemoryStore {
        fn with_counts(counts: &[usize]) -> Self {
            Self {
                counts: counts.to_vec(),
                output: Vec::new(),
            }
        }
    }

    impl DocumentStore for MemoryStore {
        fn document_count(&self) -> usize {
            self.counts.len()
        }

        fn page_count(&self, document: usize) -> Result<usize> {
            self.counts
                .get(document)
                .copied()
                .ok_or(PdfPipeError::DocumentOutOfRange {
                    index: document,
                    available: self.counts.len(),
                })
        }
    }

    impl OutputSink for MemoryStore {
        fn assemble(&mut self, pages: &[PageReference]) -> Result<usize> {
            self.output.extend(pages.iter().map(|page| (*page, None)));
            Ok(self.output.len())
        }

        fn apply_rotation(&mut self, rotations: &RotationMap) -> Result<()> {
            for (page, rotation) in rotations.iter() {
                self.output[page].1 = Some(rotation);
            }
            Ok(())
        }
    }

    const NONE: [&str; 0] = [];

    #[test]
    fn full_run_assembles_then_rotates() {
        let mut store = MemoryStore::with_counts(&[7, 5]);
        let summary = run(&mut store, &["2:5", "1:5-1,7"], &["1:90", "7:270"]).unwrap();
        assert_eq!(
            summary,
            PipelineSummary {
                output_pages: 7,
                rotated_pages: 2
            }
        );
        assert_eq!(store.output[0], (PageReference::new(1, 4), Some(Rotation::Clockwise90)));
        assert_eq!(store.output[1], (PageReference::new(0, 4), None));
        assert_eq!(store.output[6], (PageReference::new(0, 6), Some(Rotation::Clockwise270)));
    }

    #[test]
    fn rotation_bound_is_output_not_input() {
        // Output has 2 pages although the input has 10.
        let mut store = MemoryStore::with_counts(&[10]);
        let err = run(&mut store, &["1:1,2"], &["3:90"]).unwrap_err();
        assert!(matches!(
            err,
            PdfPipeError::Spec(SpecError::InvalidPageIndex { .. })
        ));
    }

    #[test]
    fn structure_error_assembles_nothing() {
        let mut store = MemoryStore::with_counts(&[2]);
        assert!(run(&mut store, &["1", "2"], &NONE).is_err());
        assert!(store.output.is_empty());
    }

    #[test]
    fn no_specs_copy_everything_unrotated() {
        let mut store = MemoryStore::with_counts(&[1, 2]);
        let summary = run(&mut store, &NONE, &NONE).unwrap();
        assert_eq!(summary.output_pages, 3);
        assert_eq!(summary.rotated_pages, 0);
        assert!(store.output.iter().all(|(_, r)| r.is_none()));
    }

    #[test]
    fn plan_matches_run() {
        let store = MemoryStore::with_counts(&[3, 3]);
        let plan = plan(&store, &["2", "1:1"], &["180"]).unwrap();
        assert_eq!(plan.pages.len(), 4);
        assert_eq!(plan.rotations.len(), 4);

        let mut store = MemoryStore::with_counts(&[3, 3]);
        let summary = run(&mut store, &["2", "1:1"], &["180"]).unwrap();
        assert_eq!(summary.output_pages, plan.pages.len());
        assert_eq!(summary.rotated_pages, plan.rotations.len());
    }

    #[test]
    fn default_store_has_no_pages() {
        let store = MemoryStore::default();
        let plan = plan(&store, &NONE, &NONE).unwrap();
        assert!(plan.pages.is_empty());
    }
}
