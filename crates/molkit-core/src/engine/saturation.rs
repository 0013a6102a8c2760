//! Hydrogen saturation performed when a molecule is closed, and its reversal.

use crate::core::elements::Element;
use crate::core::models::atom::AtomError;
use crate::core::models::graph::MolecularGraph;
use crate::core::models::ids::AtomId;
use std::collections::BTreeSet;
use tracing::trace;

/// Fills the free valence of every atom with new hydrogens.
///
/// Atoms are visited in creation order and the hydrogens take ids from the graph's
/// counter, so the result is deterministic.
///
/// # Return
///
/// The ids of every hydrogen created.
pub fn saturate(graph: &mut MolecularGraph) -> Result<BTreeSet<AtomId>, AtomError> {
    let mut added = BTreeSet::new();
    for id in graph.ids() {
        let next_id = graph.next_id();
        let atom = graph.atom_mut(id).ok_or(AtomError::UnknownAtom(id))?;
        let (hydrogens, next_id) = atom.fill(next_id);
        if !hydrogens.is_empty() {
            trace!(atom = %id, count = hydrogens.len(), "Saturating atom with hydrogens.");
        }
        graph.reserve_ids(next_id);
        for hydrogen in hydrogens {
            added.insert(hydrogen.id());
            graph.insert_atom(hydrogen);
        }
    }
    Ok(added)
}

/// Detaches and discards the given hydrogens.
///
/// Only hydrogen atoms listed in `hydrogens` are affected; every other bond stays.
///
/// # Return
///
/// The number of atoms removed from the graph.
pub fn desaturate(graph: &mut MolecularGraph, hydrogens: &BTreeSet<AtomId>) -> usize {
    for atom in graph.atoms_mut() {
        if !hydrogens.contains(&atom.id()) {
            atom.strip_saturation_hydrogens(hydrogens);
        }
    }
    graph.discard_atoms(hydrogens)
}

/// Every hydrogen that is not one of the `protected` atoms.
pub fn removable_hydrogens(
    graph: &MolecularGraph,
    protected: &BTreeSet<AtomId>,
) -> BTreeSet<AtomId> {
    graph
        .atoms()
        .into_iter()
        .filter(|atom| atom.element() == Element::H && !protected.contains(&atom.id()))
        .map(|atom| atom.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate_fills_each_atom_in_creation_order() {
        let mut graph = MolecularGraph::new();
        let c1 = graph.create_atom(Element::C);
        let o = graph.create_atom(Element::O);
        graph.bond(c1, o).unwrap();

        let added = saturate(&mut graph).unwrap();

        let expected: BTreeSet<AtomId> = (3..=6).map(AtomId::new).collect();
        assert_eq!(added, expected);
        for id in 3..=5 {
            assert!(graph.atom(c1).unwrap().is_bonded_to(AtomId::new(id)));
        }
        assert!(graph.atom(o).unwrap().is_bonded_to(AtomId::new(6)));
        assert_eq!(graph.next_id(), AtomId::new(7));
        assert!(graph.atoms().iter().all(|atom| atom.is_saturated()));
    }

    #[test]
    fn desaturate_restores_the_previous_graph() {
        let mut graph = MolecularGraph::new();
        let c1 = graph.create_atom(Element::C);
        let n = graph.create_atom(Element::N);
        graph.bond(c1, n).unwrap();
        let before: Vec<_> = graph.atoms().into_iter().cloned().collect();

        let added = saturate(&mut graph).unwrap();
        let removed = desaturate(&mut graph, &added);

        assert_eq!(removed, added.len());
        let after: Vec<_> = graph.atoms().into_iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn desaturate_keeps_hydrogens_outside_the_set() {
        let mut graph = MolecularGraph::new();
        let c = graph.create_atom(Element::C);
        let explicit = graph.create_atom(Element::H);
        graph.bond(c, explicit).unwrap();

        let added = saturate(&mut graph).unwrap();
        desaturate(&mut graph, &added);

        assert_eq!(graph.len(), 2);
        assert!(graph.atom(c).unwrap().is_bonded_to(explicit));
    }

    #[test]
    fn removable_hydrogens_skips_protected_atoms() {
        let mut graph = MolecularGraph::new();
        let c = graph.create_atom(Element::C);
        let protected_h = graph.create_atom(Element::H);
        let free_h = graph.create_atom(Element::H);
        graph.bond(c, free_h).unwrap();

        let removable = removable_hydrogens(&graph, &BTreeSet::from([c, protected_h]));
        assert_eq!(removable, BTreeSet::from([free_h]));
    }
}
