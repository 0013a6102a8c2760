use crate::engine::config::MoleculeConfig;
use crate::engine::error::MoleculeError;
use crate::engine::molecule::Molecule;
use crate::engine::request::{AddRequest, BondRequest, ChainRequest, MutateRequest};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// `error` is part of the message and is not reported through `source()`.
    #[error("Step {index} (`{op}`) failed: {error}")]
    Step {
        /// 1-based position of the step in the recipe.
        index: usize,
        op: &'static str,
        error: MoleculeError,
    },

    #[error("Recipe parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// One construction step of a [`MoleculeRecipe`], tagged by its `op` key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum RecipeStep {
    Brancher { lengths: Vec<usize> },
    Bounder { bonds: Vec<BondRequest> },
    Mutate { changes: Vec<MutateRequest> },
    Add { atoms: Vec<AddRequest> },
    AddChaining { chains: Vec<ChainRequest> },
    Closer,
    Unlock,
}

impl RecipeStep {
    pub fn op(&self) -> &'static str {
        match self {
            RecipeStep::Brancher { .. } => "brancher",
            RecipeStep::Bounder { .. } => "bounder",
            RecipeStep::Mutate { .. } => "mutate",
            RecipeStep::Add { .. } => "add",
            RecipeStep::AddChaining { .. } => "add-chaining",
            RecipeStep::Closer => "closer",
            RecipeStep::Unlock => "unlock",
        }
    }

    fn apply(&self, molecule: &mut Molecule) -> Result<(), MoleculeError> {
        let outcome = match self {
            RecipeStep::Brancher { lengths } => molecule.brancher(lengths),
            RecipeStep::Bounder { bonds } => molecule.bounder(bonds),
            RecipeStep::Mutate { changes } => molecule.mutate(changes),
            RecipeStep::Add { atoms } => molecule.add(atoms),
            RecipeStep::AddChaining { chains } => molecule.add_chaining(chains),
            RecipeStep::Closer => molecule.closer(),
            RecipeStep::Unlock => molecule.unlock(),
        };
        outcome.map(|_| ())
    }
}

/// A named, ordered list of construction steps.
///
/// ```toml
/// name = "isopropanol"
///
/// [[steps]]
/// op = "brancher"
/// lengths = [3]
///
/// [[steps]]
/// op = "add"
/// atoms = [[2, 1, "O"]]
///
/// [[steps]]
/// op = "closer"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoleculeRecipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
}

impl MoleculeRecipe {
    pub fn from_toml_str(content: &str) -> Result<Self, WorkflowError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, WorkflowError> {
        let content = std::fs::read_to_string(path).map_err(|e| WorkflowError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Builds a molecule by replaying every step of `recipe` in order.
///
/// Stops at the first failing step; the error carries its 1-based index.
#[instrument(skip_all, name = "build_workflow", fields(recipe = %recipe.name))]
pub fn run(recipe: &MoleculeRecipe, config: &MoleculeConfig) -> Result<Molecule, WorkflowError> {
    info!(steps = recipe.steps.len(), "Building molecule from recipe.");

    let mut molecule = Molecule::with_config(recipe.name.clone(), *config);
    for (i, step) in recipe.steps.iter().enumerate() {
        let index = i + 1;
        debug!(index, op = step.op(), "Applying recipe step.");
        step.apply(&mut molecule)
            .map_err(|error| WorkflowError::Step {
                index,
                op: step.op(),
                error,
            })?;
    }

    info!(state = %molecule.state(), atoms = molecule.atom_count(), "Recipe complete.");
    Ok(molecule)
}
