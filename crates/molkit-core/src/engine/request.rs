//! Request records accepted by the batch operations of [`Molecule`](super::molecule::Molecule).
//!
//! Each record deserializes from the compact tuple form used in recipes, e.g. a bond
//! between atom 1 of branch 1 and atom 3 of branch 2 is `[1, 1, 3, 2]`.

use crate::core::elements::Element;
use serde::Deserialize;

/// A 1-based `(position-in-branch, branch-number)` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "(usize, usize)")]
pub struct Coord {
    pub position: usize,
    pub branch: usize,
}

impl Coord {
    pub fn new(position: usize, branch: usize) -> Self {
        Self { position, branch }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((position, branch): (usize, usize)) -> Self {
        Self::new(position, branch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(usize, usize, usize, usize)")]
pub struct BondRequest {
    pub first: Coord,
    pub second: Coord,
}

impl BondRequest {
    pub fn new(position1: usize, branch1: usize, position2: usize, branch2: usize) -> Self {
        Self {
            first: Coord::new(position1, branch1),
            second: Coord::new(position2, branch2),
        }
    }
}

impl From<(usize, usize, usize, usize)> for BondRequest {
    fn from((p1, b1, p2, b2): (usize, usize, usize, usize)) -> Self {
        Self::new(p1, b1, p2, b2)
    }
}

/// Replace the element of the atom at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(usize, usize, Element)")]
pub struct MutateRequest {
    pub target: Coord,
    pub element: Element,
}

impl MutateRequest {
    pub fn new(position: usize, branch: usize, element: Element) -> Self {
        Self {
            target: Coord::new(position, branch),
            element,
        }
    }
}

impl From<(usize, usize, Element)> for MutateRequest {
    fn from((position, branch, element): (usize, usize, Element)) -> Self {
        Self::new(position, branch, element)
    }
}

/// Attach one new atom of `element` to the atom at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(usize, usize, Element)")]
pub struct AddRequest {
    pub target: Coord,
    pub element: Element,
}

impl AddRequest {
    pub fn new(position: usize, branch: usize, element: Element) -> Self {
        Self {
            target: Coord::new(position, branch),
            element,
        }
    }
}

impl From<(usize, usize, Element)> for AddRequest {
    fn from((position, branch, element): (usize, usize, Element)) -> Self {
        Self::new(position, branch, element)
    }
}

/// Attach a linear chain of new atoms to the atom at `target`, first element nearest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(usize, usize, Vec<Element>)")]
pub struct ChainRequest {
    pub target: Coord,
    pub elements: Vec<Element>,
}

impl ChainRequest {
    pub fn new(position: usize, branch: usize, elements: impl Into<Vec<Element>>) -> Self {
        Self {
            target: Coord::new(position, branch),
            elements: elements.into(),
        }
    }
}

impl From<(usize, usize, Vec<Element>)> for ChainRequest {
    fn from((position, branch, elements): (usize, usize, Vec<Element>)) -> Self {
        Self::new(position, branch, elements)
    }
}
