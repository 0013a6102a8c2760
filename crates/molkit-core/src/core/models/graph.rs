use super::atom::{Atom, AtomError};
use super::ids::{AtomId, AtomKey};
use crate::core::elements::Element;
use slotmap::SlotMap;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A bonded pair of atoms, reported once per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    /// The lower of the two atom ids.
    pub first: AtomId,
    /// The higher of the two atom ids.
    pub second: AtomId,
    /// Number of bonds between the pair (2 for a double bond).
    pub multiplicity: usize,
}

impl Bond {
    pub fn contains(&self, id: AtomId) -> bool {
        self.first == id || self.second == id
    }
}

/// One reversible change recorded while a journal is open.
#[derive(Debug, Clone)]
enum JournalEntry {
    /// An atom was added to the arena.
    Created(AtomId),
    /// An atom was about to change; holds its prior state.
    Modified(Atom),
}

/// The arena that owns every atom of a molecule.
///
/// Atoms are stored in a slot map and looked up through their [`AtomId`]. The graph
/// issues ids from a counter that only moves forward, so ids are unique for the
/// lifetime of the graph even after atoms are discarded.
#[derive(Debug, Clone)]
pub struct MolecularGraph {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomKey, Atom>,
    /// Lookup from public atom id to arena slot.
    id_map: HashMap<AtomId, AtomKey>,
    /// The id handed to the next created atom.
    next_id: AtomId,
    /// Undo log of the open batch, if any.
    journal: Option<Vec<JournalEntry>>,
}

impl Default for MolecularGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MolecularGraph {
    pub fn new() -> Self {
        Self {
            atoms: SlotMap::with_key(),
            id_map: HashMap::new(),
            next_id: AtomId::FIRST,
            journal: None,
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The id the next created atom will receive.
    pub fn next_id(&self) -> AtomId {
        self.next_id
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.id_map.get(&id).and_then(|&key| self.atoms.get(key))
    }

    pub(crate) fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        let key = *self.id_map.get(&id)?;
        self.atoms.get_mut(key)
    }

    fn require(&self, id: AtomId) -> Result<&Atom, AtomError> {
        self.atom(id).ok_or(AtomError::UnknownAtom(id))
    }

    fn require_mut(&mut self, id: AtomId) -> Result<&mut Atom, AtomError> {
        self.atom_mut(id).ok_or(AtomError::UnknownAtom(id))
    }

    /// Ids of every atom, in creation order.
    pub fn ids(&self) -> Vec<AtomId> {
        let mut ids: Vec<AtomId> = self.id_map.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Every atom, in creation order.
    pub fn atoms(&self) -> Vec<&Atom> {
        let mut atoms: Vec<&Atom> = self.atoms.values().collect();
        atoms.sort_unstable_by_key(|atom| atom.id());
        atoms
    }

    pub(crate) fn atoms_mut(&mut self) -> impl Iterator<Item = &mut Atom> {
        self.atoms.values_mut()
    }

    /// Creates an unbonded atom with a freshly issued id.
    pub fn create_atom(&mut self, element: Element) -> AtomId {
        let id = self.next_id;
        self.next_id = id.next();
        self.insert_atom(Atom::new(element, id));
        id
    }

    /// Registers an atom whose id was issued by [`Atom::fill`].
    pub(crate) fn insert_atom(&mut self, atom: Atom) {
        let id = atom.id();
        if id >= self.next_id {
            self.next_id = id.next();
        }
        let key = self.atoms.insert(atom);
        self.id_map.insert(id, key);
        self.record(|| JournalEntry::Created(id));
    }

    fn record(&mut self, entry: impl FnOnce() -> JournalEntry) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(entry());
        }
    }

    /// Saves the current state of `id` in the open journal before it is changed.
    fn record_modified(&mut self, id: AtomId) -> Result<(), AtomError> {
        if self.journal.is_some() {
            let previous = self.require(id)?.clone();
            self.record(|| JournalEntry::Modified(previous));
        }
        Ok(())
    }

    /// Moves the id counter forward to at least `next_id`.
    pub(crate) fn reserve_ids(&mut self, next_id: AtomId) {
        self.next_id = self.next_id.max(next_id);
    }

    /// Fails with [`AtomError::OverValence`] if `id` has no free bonding slot.
    pub fn ensure_free_valence(&self, id: AtomId) -> Result<(), AtomError> {
        self.require(id)?.ensure_free_valence()
    }

    /// Creates a symmetric bond between two distinct atoms.
    ///
    /// Capacity is checked on both endpoints before either neighbor list changes, so a
    /// failed call leaves the graph untouched.
    pub fn bond(&mut self, a: AtomId, b: AtomId) -> Result<(), AtomError> {
        if a == b {
            return Err(AtomError::SelfBond(a));
        }
        let a_ref = {
            let atom = self.require(a)?;
            atom.ensure_free_valence()?;
            atom.as_neighbor()
        };
        let b_ref = {
            let atom = self.require(b)?;
            atom.ensure_free_valence()?;
            atom.as_neighbor()
        };
        self.record_modified(a)?;
        self.record_modified(b)?;
        self.require_mut(a)?.add_neighbor(b_ref)?;
        self.require_mut(b)?.add_neighbor(a_ref)?;
        Ok(())
    }

    /// Swaps the element of an atom in place, keeping its id and bonds.
    ///
    /// The atom is replaced by a new instance and every neighbor's back-reference is
    /// redirected to it.
    pub fn replace_element(&mut self, id: AtomId, element: Element) -> Result<(), AtomError> {
        let replacement = self.require(id)?.with_element(element)?;
        let new_ref = replacement.as_neighbor();

        let neighbor_ids: BTreeSet<AtomId> =
            replacement.neighbors().iter().map(|n| n.id).collect();
        for neighbor_id in neighbor_ids {
            self.record_modified(neighbor_id)?;
            self.require_mut(neighbor_id)?.mutate_neighbor(id, new_ref)?;
        }

        self.record_modified(id)?;
        *self.require_mut(id)? = replacement;
        Ok(())
    }

    /// Drops the given atoms from the arena without touching neighbor lists.
    ///
    /// Callers detach the atoms from their neighbors first.
    pub(crate) fn discard_atoms(&mut self, ids: &BTreeSet<AtomId>) -> usize {
        let mut removed = 0;
        for id in ids {
            if let Some(key) = self.id_map.remove(id) {
                self.atoms.remove(key);
                removed += 1;
            }
        }
        removed
    }

    /// Unique bonded pairs in ascending id order.
    pub fn bonds(&self) -> Vec<Bond> {
        let mut pairs: BTreeMap<(AtomId, AtomId), usize> = BTreeMap::new();
        for atom in self.atoms.values() {
            for neighbor in atom.neighbors().iter().filter(|n| n.id > atom.id()) {
                *pairs.entry((atom.id(), neighbor.id)).or_default() += 1;
            }
        }
        pairs
            .into_iter()
            .map(|((first, second), multiplicity)| Bond {
                first,
                second,
                multiplicity,
            })
            .collect()
    }

    /// Starts recording every atom creation and modification so they can be undone.
    ///
    /// The journal grows with the atoms a batch touches, not with the size of the graph.
    pub(crate) fn begin_journal(&mut self) {
        self.journal = Some(Vec::new());
    }

    /// Keeps the recorded changes and stops recording.
    pub(crate) fn commit_journal(&mut self) {
        self.journal = None;
    }

    /// Undoes the recorded changes in reverse order and stops recording.
    ///
    /// The id counter is left where it is, so ids issued inside the journal are never
    /// issued again.
    ///
    /// # Return
    ///
    /// The number of changes undone.
    pub(crate) fn rollback_journal(&mut self) -> usize {
        let Some(journal) = self.journal.take() else {
            return 0;
        };
        let undone = journal.len();
        for entry in journal.into_iter().rev() {
            match entry {
                JournalEntry::Created(id) => {
                    if let Some(key) = self.id_map.remove(&id) {
                        self.atoms.remove(key);
                    }
                }
                JournalEntry::Modified(previous) => {
                    if let Some(atom) = self.atom_mut(previous.id()) {
                        *atom = previous;
                    }
                }
            }
        }
        undone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn propane() -> (MolecularGraph, [AtomId; 3]) {
        let mut graph = MolecularGraph::new();
        let c1 = graph.create_atom(Element::C);
        let c2 = graph.create_atom(Element::C);
        let c3 = graph.create_atom(Element::C);
        graph.bond(c1, c2).unwrap();
        graph.bond(c2, c3).unwrap();
        (graph, [c1, c2, c3])
    }

    fn assert_symmetric(graph: &MolecularGraph) {
        for atom in graph.atoms() {
            for neighbor in atom.neighbors() {
                let other = graph.atom(neighbor.id).expect("dangling neighbor");
                assert_eq!(other.element(), neighbor.element);
                let forward = atom.neighbors().iter().filter(|n| n.id == other.id()).count();
                let backward = other.neighbors().iter().filter(|n| n.id == atom.id()).count();
                assert_eq!(forward, backward);
            }
        }
    }

    #[test]
    fn create_atom_issues_sequential_ids() {
        let mut graph = MolecularGraph::new();
        assert!(graph.is_empty());
        let a = graph.create_atom(Element::C);
        let b = graph.create_atom(Element::O);
        assert_eq!(a, AtomId::new(1));
        assert_eq!(b, AtomId::new(2));
        assert_eq!(graph.next_id(), AtomId::new(3));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn bond_is_symmetric() {
        let (graph, [c1, c2, c3]) = propane();

        assert!(graph.atom(c1).unwrap().is_bonded_to(c2));
        assert!(graph.atom(c2).unwrap().is_bonded_to(c1));
        assert!(graph.atom(c2).unwrap().is_bonded_to(c3));
        assert!(!graph.atom(c1).unwrap().is_bonded_to(c3));
        assert_symmetric(&graph);
    }

    #[test]
    fn failed_bond_leaves_both_endpoints_untouched() {
        let mut graph = MolecularGraph::new();
        let c = graph.create_atom(Element::C);
        let f = graph.create_atom(Element::F);
        let o = graph.create_atom(Element::O);
        graph.bond(f, o).unwrap();

        let err = graph.bond(c, f).unwrap_err();

        assert!(matches!(err, AtomError::OverValence { id, .. } if id == f));
        assert_eq!(graph.atom(c).unwrap().degree(), 0);
        assert_eq!(graph.atom(f).unwrap().degree(), 1);
    }

    #[test]
    fn self_bond_is_rejected() {
        let mut graph = MolecularGraph::new();
        let c = graph.create_atom(Element::C);
        assert_eq!(graph.bond(c, c), Err(AtomError::SelfBond(c)));
        assert_eq!(graph.atom(c).unwrap().degree(), 0);
    }

    #[test]
    fn bond_to_unknown_atom_fails() {
        let mut graph = MolecularGraph::new();
        let c = graph.create_atom(Element::C);
        assert_eq!(
            graph.bond(c, AtomId::new(42)),
            Err(AtomError::UnknownAtom(AtomId::new(42)))
        );
        assert_eq!(graph.atom(c).unwrap().degree(), 0);
    }

    #[test]
    fn replace_element_updates_neighbor_back_references() {
        let (mut graph, [c1, c2, c3]) = propane();

        graph.replace_element(c2, Element::O).unwrap();

        assert_eq!(graph.atom(c2).unwrap().element(), Element::O);
        assert_eq!(graph.atom(c1).unwrap().neighbors()[0].element, Element::O);
        assert_eq!(graph.atom(c3).unwrap().neighbors()[0].element, Element::O);
        assert_symmetric(&graph);
    }

    #[test]
    fn replace_element_rejects_over_valence_without_changes() {
        let (mut graph, [c1, c2, _]) = propane();

        let err = graph.replace_element(c2, Element::Cl).unwrap_err();

        assert!(matches!(err, AtomError::OverValence { valence: 1, .. }));
        assert_eq!(graph.atom(c2).unwrap().element(), Element::C);
        assert_eq!(graph.atom(c1).unwrap().neighbors()[0].element, Element::C);
    }

    #[test]
    fn bonds_report_unique_pairs_with_multiplicity() {
        let mut graph = MolecularGraph::new();
        let c = graph.create_atom(Element::C);
        let o = graph.create_atom(Element::O);
        let n = graph.create_atom(Element::N);
        graph.bond(c, o).unwrap();
        graph.bond(o, c).unwrap();
        graph.bond(c, n).unwrap();

        let bonds = graph.bonds();
        assert_eq!(
            bonds,
            vec![
                Bond {
                    first: c,
                    second: o,
                    multiplicity: 2
                },
                Bond {
                    first: c,
                    second: n,
                    multiplicity: 1
                },
            ]
        );
        assert!(bonds[0].contains(o));
        assert_symmetric(&graph);
    }

    #[test]
    fn rollback_keeps_id_counter_monotonic() {
        let (mut graph, _) = propane();

        graph.begin_journal();
        let extra = graph.create_atom(Element::N);
        assert_eq!(graph.rollback_journal(), 1);

        assert!(graph.atom(extra).is_none());
        assert_eq!(graph.len(), 3);
        assert!(graph.create_atom(Element::N) > extra);
    }

    #[test]
    fn rollback_undoes_bonds_and_element_swaps() {
        let (mut graph, [c1, c2, c3]) = propane();
        let before: Vec<Atom> = graph.atoms().into_iter().cloned().collect();

        graph.begin_journal();
        graph.bond(c1, c3).unwrap();
        graph.replace_element(c2, Element::N).unwrap();
        let o = graph.create_atom(Element::O);
        graph.bond(o, c2).unwrap();
        graph.rollback_journal();

        let after: Vec<Atom> = graph.atoms().into_iter().cloned().collect();
        assert_eq!(after, before);
        assert!(graph.atom(o).is_none());
        assert_symmetric(&graph);
    }

    #[test]
    fn committed_changes_survive_a_later_rollback() {
        let (mut graph, [c1, _, c3]) = propane();

        graph.begin_journal();
        graph.bond(c1, c3).unwrap();
        graph.commit_journal();
        assert_eq!(graph.rollback_journal(), 0);

        assert!(graph.atom(c1).unwrap().is_bonded_to(c3));
    }

    #[test]
    fn journal_only_holds_touched_atoms() {
        let mut graph = MolecularGraph::new();
        let ids: Vec<AtomId> = (0..50).map(|_| graph.create_atom(Element::C)).collect();
        for pair in ids.windows(2) {
            graph.bond(pair[0], pair[1]).unwrap();
        }

        graph.begin_journal();
        graph.replace_element(ids[10], Element::N).unwrap();

        assert_eq!(graph.rollback_journal(), 3);
        assert_eq!(graph.atom(ids[10]).unwrap().element(), Element::C);
    }

    #[test]
    fn discard_atoms_frees_slots_and_ids_stay_unique() {
        let (mut graph, [c1, ..]) = propane();
        let h = graph.create_atom(Element::H);
        graph.bond(c1, h).unwrap();
        for atom in graph.atoms_mut() {
            atom.strip_saturation_hydrogens(&BTreeSet::from([h]));
        }

        assert_eq!(graph.discard_atoms(&BTreeSet::from([h])), 1);
        assert!(graph.atom(h).is_none());
        assert_eq!(graph.atom(c1).unwrap().degree(), 1);

        let next = graph.create_atom(Element::C);
        assert!(next > h);
        assert_eq!(graph.ids().last(), Some(&next));
    }

    #[test]
    fn atoms_are_listed_in_creation_order_after_slot_reuse() {
        let mut graph = MolecularGraph::new();
        let a = graph.create_atom(Element::C);
        let b = graph.create_atom(Element::H);
        graph.discard_atoms(&BTreeSet::from([a]));
        let c = graph.create_atom(Element::O);

        let order: Vec<AtomId> = graph.atoms().iter().map(|atom| atom.id()).collect();
        assert_eq!(order, vec![b, c]);
        assert_eq!(graph.ids(), vec![b, c]);
    }
}
