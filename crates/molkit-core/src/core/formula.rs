//! Canonical molecular formula and molecular weight.
//!
//! [`Formula`] counts atoms per element and renders them in canonical element order
//! (C, H, O, then alphabetical), writing a count only when it exceeds one.
//! [`molecular_weight`] sums the atomic weight of every atom.

use crate::core::elements::Element;
use crate::core::models::atom::Atom;
use std::collections::BTreeMap;
use std::fmt;

/// Element counts of a set of atoms, keyed in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    counts: BTreeMap<Element, usize>,
}

impl Formula {
    pub fn from_atoms<'a, I>(atoms: I) -> Self
    where
        I: IntoIterator<Item = &'a Atom>,
    {
        let mut counts = BTreeMap::new();
        for atom in atoms {
            *counts.entry(atom.element()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, element: Element) -> usize {
        self.counts.get(&element).copied().unwrap_or(0)
    }

    /// `(element, count)` pairs in canonical order; absent elements are skipped.
    pub fn counts(&self) -> impl Iterator<Item = (Element, usize)> + '_ {
        self.counts.iter().map(|(&element, &count)| (element, count))
    }

    /// Total number of atoms.
    pub fn atom_count(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, count) in self.counts() {
            f.write_str(element.symbol())?;
            if count > 1 {
                write!(f, "{}", count)?;
            }
        }
        Ok(())
    }
}

/// Sums the atomic weight of every atom.
pub fn molecular_weight<'a, I>(atoms: I) -> f64
where
    I: IntoIterator<Item = &'a Atom>,
{
    atoms
        .into_iter()
        .fold(0.0, |acc, atom| acc + atom.element().weight())
}
