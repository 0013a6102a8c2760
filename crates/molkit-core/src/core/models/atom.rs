use super::ids::AtomId;
use crate::core::elements::Element;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// A non-owning reference from one atom to a bonded neighbor.
///
/// The element is carried alongside the id so an atom can render and count its
/// neighbors without consulting the arena. It is kept current by
/// [`Atom::mutate_neighbor`] whenever the neighbor changes element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborRef {
    pub id: AtomId,
    pub element: Element,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AtomError {
    #[error("Atom {id} ({element}) already holds {valence} bonds")]
    OverValence {
        id: AtomId,
        element: Element,
        valence: usize,
    },
    #[error("Atom {atom} has no neighbor with id {neighbor}")]
    NeighborNotFound { atom: AtomId, neighbor: AtomId },
    #[error("Atom {0} cannot bond to itself")]
    SelfBond(AtomId),
    #[error("Atom {0} is not part of this molecule")]
    UnknownAtom(AtomId),
}

/// A node of the molecular graph.
///
/// An atom has a fixed element, an immutable id and an ordered neighbor list whose
/// length never exceeds the element's valence. A bonded pair appears once in each
/// other's list per bond, so a double bond occupies two slots on both atoms.
///
/// Bonds are two-sided: [`Atom::add_neighbor`] only records one direction, and the
/// owning [`MolecularGraph`](super::graph::MolecularGraph) is responsible for
/// recording the other.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    element: Element,
    id: AtomId,
    neighbors: Vec<NeighborRef>,
}

impl Atom {
    /// Creates an unbonded atom with its own, empty neighbor list.
    pub fn new(element: Element, id: AtomId) -> Self {
        Self {
            element,
            id,
            neighbors: Vec::with_capacity(element.valence()),
        }
    }

    pub fn id(&self) -> AtomId {
        self.id
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn neighbors(&self) -> &[NeighborRef] {
        &self.neighbors
    }

    /// Number of occupied bonding slots.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of bonding slots still available.
    pub fn free_valence(&self) -> usize {
        self.element.valence().saturating_sub(self.neighbors.len())
    }

    pub fn is_saturated(&self) -> bool {
        self.free_valence() == 0
    }

    /// Returns `true` if at least one bond links this atom to `id`.
    pub fn is_bonded_to(&self, id: AtomId) -> bool {
        self.neighbors.iter().any(|n| n.id == id)
    }

    /// The reference other atoms store when bonded to this one.
    pub fn as_neighbor(&self) -> NeighborRef {
        NeighborRef {
            id: self.id,
            element: self.element,
        }
    }

    pub(crate) fn ensure_free_valence(&self) -> Result<(), AtomError> {
        if self.is_saturated() {
            return Err(AtomError::OverValence {
                id: self.id,
                element: self.element,
                valence: self.element.valence(),
            });
        }
        Ok(())
    }

    /// Records one side of a bond to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::OverValence`] if every bonding slot is already taken.
    pub fn add_neighbor(&mut self, other: NeighborRef) -> Result<(), AtomError> {
        self.ensure_free_valence()?;
        self.neighbors.push(other);
        Ok(())
    }

    /// Replaces every reference to `old_id` with `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::NeighborNotFound`] if this atom holds no reference to `old_id`.
    pub fn mutate_neighbor(
        &mut self,
        old_id: AtomId,
        replacement: NeighborRef,
    ) -> Result<(), AtomError> {
        let mut found = false;
        for neighbor in self.neighbors.iter_mut().filter(|n| n.id == old_id) {
            *neighbor = replacement;
            found = true;
        }
        if !found {
            return Err(AtomError::NeighborNotFound {
                atom: self.id,
                neighbor: old_id,
            });
        }
        Ok(())
    }

    /// Builds the atom that replaces this one after an element swap.
    ///
    /// The replacement keeps the id and a copy of the neighbor list.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::OverValence`] if the current bond count exceeds the
    /// valence of `element`.
    pub fn with_element(&self, element: Element) -> Result<Atom, AtomError> {
        if self.neighbors.len() > element.valence() {
            return Err(AtomError::OverValence {
                id: self.id,
                element,
                valence: element.valence(),
            });
        }
        Ok(Atom {
            element,
            id: self.id,
            neighbors: self.neighbors.clone(),
        })
    }

    /// Saturates the remaining bonding slots with fresh hydrogen atoms.
    ///
    /// Hydrogens receive sequential ids starting at `next_id` and are already bonded
    /// back to this atom.
    ///
    /// # Return
    ///
    /// The created hydrogens and the first id that remains unused.
    pub fn fill(&mut self, next_id: AtomId) -> (Vec<Atom>, AtomId) {
        let mut hydrogens = Vec::with_capacity(self.free_valence());
        let mut next_id = next_id;
        while !self.is_saturated() {
            let mut hydrogen = Atom::new(Element::H, next_id);
            hydrogen.neighbors.push(self.as_neighbor());
            self.neighbors.push(hydrogen.as_neighbor());
            hydrogens.push(hydrogen);
            next_id = next_id.next();
        }
        (hydrogens, next_id)
    }

    /// Removes hydrogen neighbors whose id is in `ids`, leaving all other bonds intact.
    ///
    /// # Return
    ///
    /// The number of neighbor references removed.
    pub fn strip_saturation_hydrogens(&mut self, ids: &BTreeSet<AtomId>) -> usize {
        let before = self.neighbors.len();
        self.neighbors
            .retain(|n| !(n.element == Element::H && ids.contains(&n.id)));
        before - self.neighbors.len()
    }

    /// Neighbors sorted by canonical element rank, then id.
    pub fn sorted_neighbors(&self) -> Vec<NeighborRef> {
        let mut sorted = self.neighbors.clone();
        sorted.sort_by_key(|n| (n.element, n.id));
        sorted
    }
}

impl fmt::Display for Atom {
    /// Renders `Atom(C.1: C2,H,H,H)`; hydrogen neighbors are printed without an id.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({}.{}", self.element, self.id)?;
        if self.neighbors.is_empty() {
            return f.write_str(")");
        }
        f.write_str(": ")?;
        for (i, neighbor) in self.sorted_neighbors().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match neighbor.element {
                Element::H => f.write_str("H")?,
                element => write!(f, "{}{}", element, neighbor.id)?,
            }
        }
        f.write_str(")")
    }
}
