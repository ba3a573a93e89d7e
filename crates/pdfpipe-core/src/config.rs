// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PdfPipeError, Result};

/// Settings for assembling and writing the output document.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeConfig {
    /// Title written to the output /Info dictionary.
    pub title: String,
    /// Author written to the output /Info dictionary.
    pub author: String,
    /// Overwrite an existing output file without `--force`.
    pub overwrite: bool,
    /// Write CreationDate and ModDate into /Info.
    pub stamp_dates: bool,
    /// PDF header version of the output document.
    pub pdf_version: String,
    /// Compress content streams before saving.
    pub compress: bool,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            overwrite: false,
            stamp_dates: true,
            pdf_version: "1.7".to_string(),
            compress: false,
        }
    }
}

impl PipeConfig {
    /// Load from a JSON file. Missing keys fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            PdfPipeError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Reject settings lopdf would silently write as a broken header.
    pub fn validate(&self) -> Result<()> {
        let valid = matches!(
            self.pdf_version.as_str(),
            "1.0" | "1.1" | "1.2" | "1.3" | "1.4" | "1.5" | "1.6" | "1.7" | "2.0"
        );
        if valid {
            Ok(())
        } else {
            Err(PdfPipeError::Config(format!(
                "unsupported pdf_version {:?}",
                self.pdf_version
            )))
        }
    }
}
