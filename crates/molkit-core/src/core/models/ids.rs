use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    pub(crate) struct AtomKey;
}

/// Identity of an atom within one molecule.
///
/// Ids are issued by the owning [`MolecularGraph`](super::graph::MolecularGraph) from a
/// strictly increasing counter starting at 1, so comparing ids also compares creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(u32);

impl AtomId {
    pub const FIRST: AtomId = AtomId(1);

    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for AtomId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
