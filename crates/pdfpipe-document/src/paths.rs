// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Path checks run before any PDF is opened, so a bad command line never
// costs a parse.

use std::path::Path;

use pdfpipe_core::error::{PdfPipeError, Result};

/// An input must be an existing regular file whose name ends in `.pdf`.
pub fn validate_input(path: &Path) -> Result<()> {
    let is_pdf = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".pdf"));
    if !path.is_file() || !is_pdf {
        return Err(PdfPipeError::InvalidInput(path.display().to_string()));
    }
    Ok(())
}

/// The output may not be a directory, and may only already exist when
/// `overwrite` is set.
pub fn validate_output(path: &Path, overwrite: bool) -> Result<()> {
    let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if path.is_dir() {
        return Err(PdfPipeError::OutputIsDirectory(shown));
    }
    if path.exists() && !overwrite {
        return Err(PdfPipeError::OutputExists(shown));
    }
    Ok(())
}
