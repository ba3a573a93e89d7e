// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types produced by the resolvers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One page of the output document: which input document it comes from and
/// which page of that document. Both indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageReference {
    pub document: usize,
    pub page: usize,
}

impl PageReference {
    pub fn new(document: usize, page: usize) -> Self {
        Self { document, page }
    }
}

impl fmt::Display for PageReference {
    /// Renders the reference 1-based, the way it would be written in a
    /// structure specification.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document + 1, self.page + 1)
    }
}

/// A quarter-turn page rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    None,
    Clockwise90,
    Upside180,
    Clockwise270,
}

impl Rotation {
    /// Map a degree value onto a rotation. Only `0`, `90`, `180` and `270`
    /// are accepted.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::None),
            90 => Some(Self::Clockwise90),
            180 => Some(Self::Upside180),
            270 => Some(Self::Clockwise270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 90,
            Self::Upside180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// A rotation applied to a list of output pages (0-based, in the order they
/// were written).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationAssignment {
    pub pages: Vec<usize>,
    pub rotation: Rotation,
}

/// Final rotation per output page after all assignments have been applied.
///
/// Pages without an entry keep their original rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationMap {
    entries: BTreeMap<usize, Rotation>,
}

impl RotationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an assignment; later assignments overwrite earlier ones.
    pub fn apply(&mut self, assignment: &RotationAssignment) {
        for &page in &assignment.pages {
            self.entries.insert(page, assignment.rotation);
        }
    }

    pub fn get(&self, page: usize) -> Option<Rotation> {
        self.entries.get(&page).copied()
    }

    /// Entries in ascending output-page order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Rotation)> + '_ {
        self.entries.iter().map(|(page, rotation)| (*page, *rotation))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
