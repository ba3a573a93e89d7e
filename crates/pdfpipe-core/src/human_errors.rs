// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every error is mapped to a one-line message plus a suggestion. The message
// always contains the offending literal so the user can find it in what they
// typed.

use crate::error::{PdfPipeError, SpecError};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The command line needs fixing (bad token, wrong path, missing -f).
    Usage,
    /// An input file cannot be used as it is.
    Input,
    /// Reading or writing failed for reasons outside the arguments.
    Environment,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `PdfPipeError` into a `HumanError`.
pub fn humanize_error(err: &PdfPipeError) -> HumanError {
    match err {
        PdfPipeError::Spec(spec) => humanize_spec_error(spec),

        PdfPipeError::Pdf(detail) => HumanError {
            message: format!("A PDF could not be processed: {detail}"),
            suggestion: "Check the file opens in a PDF viewer. Damaged files cannot be used.".into(),
            severity: Severity::Input,
        },

        PdfPipeError::ProtectedDocument { .. } => HumanError {
            message: err.to_string(),
            suggestion: "Remove the password protection and try again.".into(),
            severity: Severity::Input,
        },

        PdfPipeError::DocumentOutOfRange { .. } => HumanError {
            message: err.to_string(),
            suggestion: "Document indices count the -i files from 1.".into(),
            severity: Severity::Usage,
        },

        PdfPipeError::InvalidInput(_) => HumanError {
            message: err.to_string(),
            suggestion: "Inputs must be existing files ending in .pdf.".into(),
            severity: Severity::Usage,
        },

        PdfPipeError::OutputExists(_) => HumanError {
            message: err.to_string(),
            suggestion: "Choose another output path, or pass -f to replace the file.".into(),
            severity: Severity::Usage,
        },

        PdfPipeError::OutputIsDirectory(_) => HumanError {
            message: err.to_string(),
            suggestion: "Give a file name, e.g. -o output.pdf.".into(),
            severity: Severity::Usage,
        },

        PdfPipeError::Config(_) | PdfPipeError::Serialization(_) => HumanError {
            message: err.to_string(),
            suggestion: "Fix the configuration file or run without --config.".into(),
            severity: Severity::Usage,
        },

        PdfPipeError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: format!("A file could not be found: {io_err}"),
                suggestion: "Check the path is spelled correctly.".into(),
                severity: Severity::Environment,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: format!("Permission denied: {io_err}"),
                suggestion: "Check the file and directory permissions.".into(),
                severity: Severity::Environment,
            },
            _ => HumanError {
                message: format!("Reading or writing a file failed: {io_err}"),
                suggestion: "Check there is enough free space and try again.".into(),
                severity: Severity::Environment,
            },
        },
    }
}

fn humanize_spec_error(err: &SpecError) -> HumanError {
    let suggestion = match err {
        SpecError::MalformedToken(_) => {
            "Use at most one ':' per token and one '-' per range, e.g. 2:1,3-5."
        }
        SpecError::InvalidDocumentIndex(_) => {
            "Document indices start at 1 and cannot exceed the number of input files."
        }
        SpecError::InvalidPageIndex { .. } => {
            "Page numbers start at 1 and cannot exceed the page count."
        }
        SpecError::InvalidRotationValue(_) => "Rotation must be one of 0, 90, 180 or 270.",
        SpecError::EmptyPageRangeList(_) => {
            "Put the pages before the ':', e.g. 1-3:90."
        }
    };
    HumanError {
        message: err.to_string(),
        suggestion: suggestion.into(),
        severity: Severity::Usage,
    }
}
