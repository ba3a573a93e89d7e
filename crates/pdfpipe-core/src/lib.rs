// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfpipe — page selection and rotation specification language, plus the
// store traits and error types shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod items;
pub mod pipeline;
pub mod rotation;
pub mod selection;
pub mod store;
pub mod types;

pub use config::PipeConfig;
pub use error::{PdfPipeError, SpecError, SpecErrorKind};
pub use pipeline::{Plan, PipelineSummary};
pub use rotation::{RotationSpec, resolve_rotation};
pub use selection::{StructureToken, resolve_structure, split_tokens};
pub use store::{DocumentStore, OutputSink};
pub use types::*;
