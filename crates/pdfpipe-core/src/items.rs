// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page item grammar shared by the structure and rotation specifications:
//
//   pageList := pageItem ("," pageItem)*
//   pageItem := pageNumber | pageNumber "-" pageNumber

/// Why a page item could not be parsed. The caller decides which literal
/// (item or whole token) to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemError {
    /// More than one `-`.
    Malformed,
    /// A side is empty or not an unsigned base-10 integer.
    NotNumeric,
}

/// A single 1-based page number or an inclusive range. `from > to` means the
/// range is walked backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Single(usize),
    Range { from: usize, to: usize },
}

impl PageItem {
    pub(crate) fn parse(item: &str) -> Result<Self, ItemError> {
        let mut parts = item.split('-');
        let first = parts.next().unwrap_or_default();
        match (parts.next(), parts.next()) {
            (None, _) => Ok(Self::Single(parse_number(first)?)),
            (Some(second), None) => Ok(Self::Range {
                from: parse_number(first)?,
                to: parse_number(second)?,
            }),
            (Some(_), Some(_)) => Err(ItemError::Malformed),
        }
    }

    /// Expand to 0-based indices in traversal order, or `None` when any page
    /// number falls outside `1..=count`.
    ///
    /// Both ends are checked before anything is produced, so a bad range never
    /// yields a partial expansion.
    pub fn expand(&self, count: usize) -> Option<Vec<usize>> {
        let in_bounds = |n: usize| n >= 1 && n <= count;
        match *self {
            Self::Single(n) => in_bounds(n).then(|| vec![n - 1]),
            Self::Range { from, to } => {
                if !in_bounds(from) || !in_bounds(to) {
                    return None;
                }
                if from > to {
                    Some((to - 1..from).rev().collect())
                } else {
                    Some((from - 1..to).collect())
                }
            }
        }
    }
}

/// Parse a comma separated page list. Returns the offending item on failure.
pub(crate) fn parse_list(list: &str) -> Result<Vec<PageItem>, (ItemError, &str)> {
    list.split(',')
        .map(|item| PageItem::parse(item).map_err(|err| (err, item)))
        .collect()
}

fn parse_number(text: &str) -> Result<usize, ItemError> {
    // `usize::from_str` tolerates a leading '+', which is not part of the
    // grammar.
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ItemError::NotNumeric);
    }
    text.parse().map_err(|_| ItemError::NotNumeric)
}

/// Parse an unsigned base-10 literal with the same rules as page numbers.
pub(crate) fn parse_unsigned(text: &str) -> Option<usize> {
    parse_number(text).ok()
}
