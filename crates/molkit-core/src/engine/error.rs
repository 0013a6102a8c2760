use crate::core::elements::Element;
use crate::core::models::atom::AtomError;
use crate::core::models::ids::AtomId;
use thiserror::Error;

/// Why a bond could not be formed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BondError {
    #[error("atom {0} cannot bond to itself")]
    SelfBond(AtomId),

    #[error("atom {id} ({element}) would exceed its valence of {valence}")]
    OverValence {
        id: AtomId,
        element: Element,
        valence: usize,
    },

    #[error("{element} has valence {valence} and can only end a chain")]
    ChainTerminator { element: Element, valence: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoleculeError {
    #[error("Cannot close a molecule without atoms")]
    EmptyMolecule,

    #[error("Molecule is closed; unlock it before editing")]
    LockedMolecule,

    #[error("Molecule is not closed")]
    UnlockedMolecule,

    #[error("Invalid bond: {0}")]
    InvalidBond(#[from] BondError),

    #[error("No atom at position {position} of branch {branch}")]
    IndexOutOfRange { position: usize, branch: usize },

    #[error("Atom {atom} has no neighbor with id {neighbor}")]
    NeighborNotFound { atom: AtomId, neighbor: AtomId },

    #[error("Atom {0} is not part of this molecule")]
    UnknownAtom(AtomId),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl From<AtomError> for MoleculeError {
    fn from(err: AtomError) -> Self {
        match err {
            AtomError::OverValence {
                id,
                element,
                valence,
            } => MoleculeError::InvalidBond(BondError::OverValence {
                id,
                element,
                valence,
            }),
            AtomError::SelfBond(id) => MoleculeError::InvalidBond(BondError::SelfBond(id)),
            AtomError::NeighborNotFound { atom, neighbor } => {
                MoleculeError::NeighborNotFound { atom, neighbor }
            }
            AtomError::UnknownAtom(id) => MoleculeError::UnknownAtom(id),
        }
    }
}
