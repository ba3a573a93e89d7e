// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Selection resolver — turns a structure specification into the ordered list
// of pages that make up the output document.
//
//   token := docIndex | docIndex ":" pageList
//
// Examples (1-based, space separated):
//
//   1 2               all pages of the first file, then all of the second
//   2:1,3 1:3 3:1-4   pages 1 and 3 of file 2, page 3 of file 1, 1-4 of file 3
//   1:3,2,4 2 2 3:1,1 pages may be repeated freely
//   2:5 1:5-1,7       descending ranges are walked backwards

use std::str::FromStr;

use tracing::debug;

use crate::error::{SpecError, SpecScope};
use crate::items::{self, ItemError, PageItem};
use crate::types::PageReference;

/// One token of a structure specification.
///
/// Parsing only splits the token and reads the document index. The page list
/// is parsed during resolution, once the document index is known to address
/// a loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureToken {
    /// Token text as written, kept for error reporting.
    pub text: String,
    /// 1-based document index.
    pub document: usize,
    /// Raw page list. `None` selects every page of the document.
    pub pages: Option<String>,
}

impl FromStr for StructureToken {
    type Err = SpecError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut parts = token.split(':');
        let id = parts.next().unwrap_or_default();
        let list = parts.next();
        if parts.next().is_some() {
            return Err(SpecError::MalformedToken(token.to_owned()));
        }

        let document = items::parse_unsigned(id)
            .ok_or_else(|| SpecError::InvalidDocumentIndex(token.to_owned()))?;

        Ok(Self {
            text: token.to_owned(),
            document,
            pages: list.map(str::to_owned),
        })
    }
}

impl StructureToken {
    /// Parse the page list into items, each paired with its text.
    ///
    /// Returns `None` when the token has no page list.
    pub fn items(&self) -> Result<Option<Vec<(&str, PageItem)>>, SpecError> {
        let Some(list) = self.pages.as_deref() else {
            return Ok(None);
        };
        if list.is_empty() {
            return Err(SpecError::MalformedToken(self.text.clone()));
        }
        let parsed = items::parse_list(list).map_err(|(err, item)| match err {
            ItemError::Malformed => SpecError::MalformedToken(item.to_owned()),
            ItemError::NotNumeric => SpecError::page(SpecScope::Structure, item),
        })?;
        Ok(Some(list.split(',').zip(parsed).collect()))
    }

    /// Append the pages this token selects to `out`.
    ///
    /// `page_counts[i]` is the page count of the i-th loaded document. The
    /// document index is checked before any page item is looked at.
    fn resolve_into(
        &self,
        page_counts: &[usize],
        out: &mut Vec<PageReference>,
    ) -> Result<(), SpecError> {
        let document = self
            .document
            .checked_sub(1)
            .filter(|index| *index < page_counts.len())
            .ok_or_else(|| SpecError::InvalidDocumentIndex(self.text.clone()))?;
        let count = page_counts[document];

        match self.items()? {
            None => out.extend((0..count).map(|page| PageReference::new(document, page))),
            Some(items) => {
                for (text, item) in items {
                    let pages = item
                        .expand(count)
                        .ok_or_else(|| SpecError::page(SpecScope::Structure, text))?;
                    out.extend(pages.into_iter().map(|page| PageReference::new(document, page)));
                }
            }
        }
        Ok(())
    }
}

/// Resolve a structure specification against the page counts of the loaded
/// documents.
///
/// An empty token list selects every page of every document in load order.
/// Repeated tokens and repeated pages each produce their own reference.
pub fn resolve_structure<S: AsRef<str>>(
    tokens: &[S],
    page_counts: &[usize],
) -> Result<Vec<PageReference>, SpecError> {
    let mut out = Vec::new();

    if tokens.is_empty() {
        for (document, &count) in page_counts.iter().enumerate() {
            out.extend((0..count).map(|page| PageReference::new(document, page)));
        }
        debug!(pages = out.len(), "No structure given, selecting every page");
        return Ok(out);
    }

    for token in tokens {
        let token: StructureToken = token.as_ref().parse()?;
        token.resolve_into(page_counts, &mut out)?;
    }

    debug!(tokens = tokens.len(), pages = out.len(), "Structure resolved");
    Ok(out)
}

/// Split a space separated specification string into tokens.
pub fn split_tokens(spec: &str) -> Vec<&str> {
    spec.split_whitespace().collect()
}
