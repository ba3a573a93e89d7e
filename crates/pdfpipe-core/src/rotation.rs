// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rotation resolver — maps output pages to rotation degrees.
//
// A rotation specification is either a single bare degree value applied to
// every page (`90`), or a list of `pageList:degrees` assignments addressing
// 1-based positions in the assembled output (`1-4,7:180 8-12:270`).

use tracing::debug;

use crate::error::{SpecError, SpecScope};
use crate::items::{self, ItemError, PageItem};
use crate::types::{Rotation, RotationAssignment, RotationMap};

/// A parsed rotation specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationSpec {
    /// Nothing to rotate.
    Unset,
    /// One degree value for every output page.
    Global(Rotation),
    /// Assignments applied in order.
    Assignments(Vec<AssignmentToken>),
}

/// One `pageList:degrees` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentToken {
    pub text: String,
    pub items: Vec<PageItem>,
    pub rotation: Rotation,
}

impl RotationSpec {
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, SpecError> {
        match tokens {
            [] => Ok(Self::Unset),
            [only] if !only.as_ref().contains(':') => {
                Ok(Self::Global(parse_degrees(only.as_ref())?))
            }
            _ => tokens
                .iter()
                .map(|token| parse_assignment(token.as_ref()))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Assignments),
        }
    }

    /// Resolve against the number of pages in the assembled output.
    pub fn resolve(&self, page_count: usize) -> Result<RotationMap, SpecError> {
        let mut map = RotationMap::new();
        match self {
            Self::Unset => {}
            Self::Global(rotation) => map.apply(&RotationAssignment {
                pages: (0..page_count).collect(),
                rotation: *rotation,
            }),
            Self::Assignments(tokens) => {
                // Resolve everything first so a late error leaves no partial map.
                let assignments = tokens
                    .iter()
                    .map(|token| token.resolve(page_count))
                    .collect::<Result<Vec<_>, _>>()?;
                for assignment in &assignments {
                    map.apply(assignment);
                }
            }
        }
        Ok(map)
    }
}

impl AssignmentToken {
    fn resolve(&self, page_count: usize) -> Result<RotationAssignment, SpecError> {
        let mut pages = Vec::new();
        for item in &self.items {
            let indices = item
                .expand(page_count)
                .ok_or_else(|| SpecError::page(SpecScope::Rotation, &self.text))?;
            pages.extend(indices);
        }
        Ok(RotationAssignment {
            pages,
            rotation: self.rotation,
        })
    }
}

fn parse_assignment(token: &str) -> Result<AssignmentToken, SpecError> {
    let (list, degrees) = token
        .rsplit_once(':')
        .ok_or_else(|| SpecError::MalformedToken(token.to_owned()))?;
    let rotation = parse_degrees(degrees)?;
    if list.is_empty() {
        return Err(SpecError::EmptyPageRangeList(token.to_owned()));
    }
    let items = items::parse_list(list).map_err(|(err, item)| match err {
        ItemError::Malformed => SpecError::MalformedToken(item.to_owned()),
        ItemError::NotNumeric => SpecError::page(SpecScope::Rotation, token),
    })?;
    Ok(AssignmentToken {
        text: token.to_owned(),
        items,
        rotation,
    })
}

fn parse_degrees(text: &str) -> Result<Rotation, SpecError> {
    items::parse_unsigned(text)
        .and_then(|degrees| u32::try_from(degrees).ok())
        .and_then(Rotation::from_degrees)
        .ok_or_else(|| SpecError::InvalidRotationValue(text.to_owned()))
}

/// Parse and resolve a rotation specification in one step.
pub fn resolve_rotation<S: AsRef<str>>(
    tokens: &[S],
    page_count: usize,
) -> Result<RotationMap, SpecError> {
    let map = RotationSpec::parse(tokens)?.resolve(page_count)?;
    debug!(page_count, rotated = map.len(), "Rotation resolved");
    Ok(map)
}
