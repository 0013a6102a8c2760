use crate::cli::BuildArgs;
use crate::config;
use crate::error::{CliError, Result};
use molkit::engine::molecule::Molecule;
use molkit::workflows::build::{self, MoleculeRecipe, WorkflowError};
use std::path::Path;
use tracing::info;

pub fn run(args: BuildArgs) -> Result<()> {
    let config = config::resolve(&args)?;
    let recipe = load_recipe(&args.recipe)?;

    let molecule = build::run(&recipe, &config)?;
    info!(name = %molecule.name(), state = %molecule.state(), "Molecule built.");

    print!("{}", render_report(&molecule)?);
    Ok(())
}

fn load_recipe(path: &Path) -> Result<MoleculeRecipe> {
    MoleculeRecipe::load(path).map_err(|e| match e {
        WorkflowError::Toml(source) => CliError::FileParsing {
            path: path.to_path_buf(),
            source: source.into(),
        },
        other => CliError::Workflow(other),
    })
}

/// Summary printed after a build; formula and weight are only available once the
/// molecule is closed.
pub fn render_report(molecule: &Molecule) -> Result<String> {
    let name = if molecule.name().is_empty() {
        "<unnamed>"
    } else {
        molecule.name()
    };
    let mut lines = vec![
        format!("Name:     {}", name),
        format!("State:    {}", molecule.state()),
    ];
    if molecule.is_closed() {
        lines.push(format!("Formula:  {}", molecule.formula()?));
        lines.push(format!("Weight:   {:.1}", molecule.molecular_weight()?));
    }
    lines.push(format!("Atoms:    {}", molecule.atom_count()));
    lines.extend(molecule.atoms().iter().map(|atom| format!("  {}", atom)));

    let mut report = lines.join("\n");
    report.push('\n');
    Ok(report)
}
