use super::config::{MoleculeConfig, UnlockPolicy};
use super::error::{BondError, MoleculeError};
use super::request::{AddRequest, BondRequest, ChainRequest, Coord, MutateRequest};
use super::saturation;
use crate::core::elements::Element;
use crate::core::formula::{self, Formula};
use crate::core::models::atom::Atom;
use crate::core::models::graph::{Bond, MolecularGraph};
use crate::core::models::ids::AtomId;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

/// Lifecycle state of a [`Molecule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoleculeState {
    /// Editable; derived properties are unavailable.
    Open,
    /// Saturated with hydrogens; only queries are allowed.
    Closed,
}

impl fmt::Display for MoleculeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MoleculeState::Open => "Open",
                MoleculeState::Closed => "Closed",
            }
        )
    }
}

/// A molecular graph under construction.
///
/// Atoms are created in groups ("branches") by [`Molecule::brancher`] and addressed by
/// 1-based `(position, branch)` coordinates in every later operation. Atoms attached
/// with [`Molecule::add`] or [`Molecule::add_chaining`] belong to no branch and cannot
/// be addressed.
///
/// A molecule starts [`MoleculeState::Open`]. [`Molecule::closer`] saturates every
/// atom with hydrogens and locks the molecule so that [`Molecule::formula`] and
/// [`Molecule::molecular_weight`] become available; [`Molecule::unlock`] reverses the
/// saturation and reopens it.
///
/// Batch operations apply their entries left to right. With the default
/// [`BatchMode::Transactional`](super::config::BatchMode::Transactional) a failing entry
/// leaves the molecule exactly as it was before the call.
#[derive(Debug, Clone)]
pub struct Molecule {
    name: String,
    state: MoleculeState,
    pub(super) graph: MolecularGraph,
    /// Atom ids of each branch, in creation order.
    pub(super) branches: Vec<Vec<AtomId>>,
    /// Hydrogens created by the last closure.
    saturation: BTreeSet<AtomId>,
    pub(super) config: MoleculeConfig,
}

impl Default for Molecule {
    fn default() -> Self {
        Self::new("")
    }
}

impl Molecule {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, MoleculeConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: MoleculeConfig) -> Self {
        Self {
            name: name.into(),
            state: MoleculeState::Open,
            graph: MolecularGraph::new(),
            branches: Vec::new(),
            saturation: BTreeSet::new(),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> MoleculeState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == MoleculeState::Closed
    }

    pub fn config(&self) -> &MoleculeConfig {
        &self.config
    }

    pub(super) fn ensure_open(&self) -> Result<(), MoleculeError> {
        match self.state {
            MoleculeState::Open => Ok(()),
            MoleculeState::Closed => Err(MoleculeError::LockedMolecule),
        }
    }

    fn ensure_closed(&self) -> Result<(), MoleculeError> {
        match self.state {
            MoleculeState::Closed => Ok(()),
            MoleculeState::Open => Err(MoleculeError::UnlockedMolecule),
        }
    }

    /// Resolves a 1-based coordinate to the atom it names.
    pub fn resolve(&self, coord: Coord) -> Result<AtomId, MoleculeError> {
        let out_of_range = || MoleculeError::IndexOutOfRange {
            position: coord.position,
            branch: coord.branch,
        };
        let branch = coord
            .branch
            .checked_sub(1)
            .and_then(|i| self.branches.get(i))
            .ok_or_else(out_of_range)?;
        coord
            .position
            .checked_sub(1)
            .and_then(|i| branch.get(i))
            .copied()
            .ok_or_else(out_of_range)
    }

    /// Creates one branch of carbon atoms per length, each bonded into a simple path.
    ///
    /// Like every batch operation, an empty batch changes nothing but still requires an
    /// open molecule.
    pub fn brancher(&mut self, lengths: &[usize]) -> Result<&mut Self, MoleculeError> {
        self.ensure_open()?;
        if let Some(index) = lengths.iter().position(|&n| n == 0) {
            return Err(MoleculeError::MalformedRequest(format!(
                "branch length #{} must be positive",
                index + 1
            )));
        }

        self.transaction("brancher", |m| {
            for &length in lengths {
                let ids: Vec<AtomId> = (0..length)
                    .map(|_| m.graph.create_atom(Element::C))
                    .collect();
                for pair in ids.windows(2) {
                    m.graph.bond(pair[0], pair[1])?;
                }
                debug!(branch = m.branches.len() + 1, length, "Created branch.");
                m.branches.push(ids);
            }
            Ok(())
        })
    }

    /// Bonds pairs of existing atoms.
    pub fn bounder(&mut self, bonds: &[BondRequest]) -> Result<&mut Self, MoleculeError> {
        self.ensure_open()?;
        self.transaction("bounder", |m| {
            for bond in bonds {
                let first = m.resolve(bond.first)?;
                let second = m.resolve(bond.second)?;
                m.graph.bond(first, second)?;
                debug!(%first, %second, "Bonded atoms.");
            }
            Ok(())
        })
    }

    /// Changes the element of existing atoms, keeping their ids and bonds.
    pub fn mutate(&mut self, changes: &[MutateRequest]) -> Result<&mut Self, MoleculeError> {
        self.ensure_open()?;
        self.transaction("mutate", |m| {
            for change in changes {
                let id = m.resolve(change.target)?;
                m.graph.replace_element(id, change.element)?;
                debug!(atom = %id, element = %change.element, "Mutated atom.");
            }
            Ok(())
        })
    }

    /// Attaches one new atom to each target.
    pub fn add(&mut self, atoms: &[AddRequest]) -> Result<&mut Self, MoleculeError> {
        self.ensure_open()?;
        self.transaction("add", |m| {
            for spec in atoms {
                let target = m.resolve(spec.target)?;
                m.graph.ensure_free_valence(target)?;
                let added = m.graph.create_atom(spec.element);
                m.graph.bond(target, added)?;
                debug!(%target, %added, element = %spec.element, "Added atom.");
            }
            Ok(())
        })
    }

    /// Attaches a linear chain of new atoms to each target.
    ///
    /// Every chain element except the last must have a valence of at least 2.
    pub fn add_chaining(&mut self, chains: &[ChainRequest]) -> Result<&mut Self, MoleculeError> {
        self.ensure_open()?;
        for (index, chain) in chains.iter().enumerate() {
            let Some((_, inner)) = chain.elements.split_last() else {
                return Err(MoleculeError::MalformedRequest(format!(
                    "chain #{} has no elements",
                    index + 1
                )));
            };
            if let Some(&element) = inner.iter().find(|e| e.valence() < 2) {
                return Err(BondError::ChainTerminator {
                    element,
                    valence: element.valence(),
                }
                .into());
            }
        }

        self.transaction("add_chaining", |m| {
            for chain in chains {
                let target = m.resolve(chain.target)?;
                m.graph.ensure_free_valence(target)?;
                let mut previous = target;
                for &element in &chain.elements {
                    let next = m.graph.create_atom(element);
                    m.graph.bond(previous, next)?;
                    previous = next;
                }
                debug!(%target, length = chain.elements.len(), "Attached chain.");
            }
            Ok(())
        })
    }

    /// Saturates every atom with hydrogens and locks the molecule.
    pub fn closer(&mut self) -> Result<&mut Self, MoleculeError> {
        self.ensure_open()?;
        if self.graph.is_empty() {
            return Err(MoleculeError::EmptyMolecule);
        }

        self.saturation = saturation::saturate(&mut self.graph)?;
        self.state = MoleculeState::Closed;
        info!(
            name = %self.name,
            hydrogens = self.saturation.len(),
            atoms = self.graph.len(),
            "Closed molecule."
        );
        Ok(self)
    }

    /// Removes hydrogens according to the configured [`UnlockPolicy`] and reopens the molecule.
    pub fn unlock(&mut self) -> Result<&mut Self, MoleculeError> {
        self.ensure_closed()?;

        let mut hydrogens = std::mem::take(&mut self.saturation);
        if self.config.unlock_policy == UnlockPolicy::AllHydrogens {
            let branch_members: BTreeSet<AtomId> =
                self.branches.iter().flatten().copied().collect();
            hydrogens.extend(saturation::removable_hydrogens(&self.graph, &branch_members));
        }
        let removed = saturation::desaturate(&mut self.graph, &hydrogens);
        self.state = MoleculeState::Open;
        info!(name = %self.name, removed, "Unlocked molecule.");
        Ok(self)
    }

    /// Canonical formula of the closed molecule.
    pub fn formula(&self) -> Result<Formula, MoleculeError> {
        self.ensure_closed()?;
        Ok(Formula::from_atoms(self.graph.atoms()))
    }

    /// Sum of the atomic weights of the closed molecule.
    pub fn molecular_weight(&self) -> Result<f64, MoleculeError> {
        self.ensure_closed()?;
        Ok(formula::molecular_weight(self.graph.atoms()))
    }

    /// A copy of every atom in creation order, detached from the molecule.
    pub fn atoms(&self) -> Vec<Atom> {
        self.graph.atoms().into_iter().cloned().collect()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.graph.atom(id)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.len()
    }

    /// Atom ids of each branch, in creation order.
    pub fn branches(&self) -> &[Vec<AtomId>] {
        &self.branches
    }

    pub fn bonds(&self) -> Vec<Bond> {
        self.graph.bonds()
    }

    /// Ids of the hydrogens added by the current closure; empty while open.
    pub fn saturation_hydrogens(&self) -> &BTreeSet<AtomId> {
        &self.saturation
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "<unnamed>"
        } else {
            &self.name
        };
        writeln!(f, "Molecule({}, {})", name, self.state)?;
        for atom in self.graph.atoms() {
            writeln!(f, "  {}", atom)?;
        }
        Ok(())
    }
}
