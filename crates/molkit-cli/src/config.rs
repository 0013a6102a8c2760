use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use molkit::engine::config::{ConfigError, MoleculeConfig};
use tracing::debug;

/// Loads the molecule configuration for `build`: the config file if one was given,
/// otherwise the defaults, with command-line overrides applied last.
pub fn resolve(args: &BuildArgs) -> Result<MoleculeConfig> {
    let base = match &args.config {
        Some(path) => {
            debug!("Loading configuration from file: {:?}", path);
            MoleculeConfig::load(path).map_err(|e| match e {
                ConfigError::Toml(source) => CliError::FileParsing {
                    path: path.clone(),
                    source: source.into(),
                },
                other => CliError::Config(other),
            })?
        }
        None => MoleculeConfig::default(),
    };

    let config = MoleculeConfig::builder()
        .batch_mode(args.batch_mode.map_or(base.batch_mode, Into::into))
        .unlock_policy(args.unlock_policy.map_or(base.unlock_policy, Into::into))
        .build();
    debug!(?config, "Resolved molecule configuration.");
    Ok(config)
}
