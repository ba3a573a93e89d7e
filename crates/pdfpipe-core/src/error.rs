// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for pdfpipe.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which specification a page index error was raised from.
///
/// The same item grammar serves both the structure and the rotation
/// specification, but the two report out-of-range indices differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecScope {
    Structure,
    Rotation,
}

impl fmt::Display for SpecScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => f.write_str("invalid page index"),
            Self::Rotation => f.write_str("invalid rotation argument"),
        }
    }
}

/// Kind of a [`SpecError`], without the offending literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecErrorKind {
    MalformedToken,
    InvalidDocumentIndex,
    InvalidPageIndex,
    InvalidRotationValue,
    EmptyPageRangeList,
}

/// A structure or rotation specification could not be resolved.
///
/// Every variant carries the literal token or item text that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("invalid document index: {0}")]
    InvalidDocumentIndex(String),

    #[error("{scope}: {literal}")]
    InvalidPageIndex { scope: SpecScope, literal: String },

    #[error("invalid rotation value: {0}")]
    InvalidRotationValue(String),

    #[error("empty page range list: {0}")]
    EmptyPageRangeList(String),
}

impl SpecError {
    pub fn kind(&self) -> SpecErrorKind {
        match self {
            Self::MalformedToken(_) => SpecErrorKind::MalformedToken,
            Self::InvalidDocumentIndex(_) => SpecErrorKind::InvalidDocumentIndex,
            Self::InvalidPageIndex { .. } => SpecErrorKind::InvalidPageIndex,
            Self::InvalidRotationValue(_) => SpecErrorKind::InvalidRotationValue,
            Self::EmptyPageRangeList(_) => SpecErrorKind::EmptyPageRangeList,
        }
    }

    /// The offending token or item text, exactly as it appeared in the input.
    pub fn literal(&self) -> &str {
        match self {
            Self::MalformedToken(s)
            | Self::InvalidDocumentIndex(s)
            | Self::InvalidRotationValue(s)
            | Self::EmptyPageRangeList(s) => s,
            Self::InvalidPageIndex { literal, .. } => literal,
        }
    }

    pub(crate) fn page(scope: SpecScope, literal: &str) -> Self {
        Self::InvalidPageIndex {
            scope,
            literal: literal.to_owned(),
        }
    }
}

/// Top-level error type for all pdfpipe operations.
#[derive(Debug, Error)]
pub enum PdfPipeError {
    // -- Specification errors --
    #[error(transparent)]
    Spec(#[from] SpecError),

    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("cannot load {name}: protected files are unsupported")]
    ProtectedDocument { name: String },

    #[error("document index {index} out of range ({available} documents loaded)")]
    DocumentOutOfRange { index: usize, available: usize },

    // -- Input / output validation --
    #[error("Invalid input file: {0}")]
    InvalidInput(String),

    #[error("{} already exists. Use -f to force writing file.", .0.display())]
    OutputExists(PathBuf),

    #[error("{} is a directory, must be a file.", .0.display())]
    OutputIsDirectory(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    // -- Storage --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PdfPipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_index_message_depends_on_scope() {
        let structure = SpecError::page(SpecScope::Structure, "9");
        let rotation = SpecError::page(SpecScope::Rotation, "1-20:90");
        assert_eq!(structure.to_string(), "invalid page index: 9");
        assert_eq!(rotation.to_string(), "invalid rotation argument: 1-20:90");
        assert_eq!(rotation.kind(), SpecErrorKind::InvalidPageIndex);
    }

    #[test]
    fn literal_is_preserved() {
        let err = SpecError::MalformedToken("1:2:3".into());
        assert_eq!(err.literal(), "1:2:3");
        assert_eq!(err.kind(), SpecErrorKind::MalformedToken);
    }

    #[test]
    fn spec_error_is_transparent_at_top_level() {
        let err: PdfPipeError = SpecError::InvalidDocumentIndex("4".into()).into();
        assert_eq!(err.to_string(), "invalid document index: 4");
    }

    #[test]
    fn output_exists_message() {
        let err = PdfPipeError::OutputExists(PathBuf::from("/tmp/out.pdf"));
        assert_eq!(
            err.to_string(),
            "/tmp/out.pdf already exists. Use -f to force writing file."
        );
    }
}
