use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How a batch operation reacts to a failing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchMode {
    /// Either every entry of the batch is applied or none is.
    #[default]
    Transactional,
    /// Entries before the failing one stay applied.
    Sequential,
}

/// Which hydrogens [`Molecule::unlock`](super::molecule::Molecule::unlock) removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnlockPolicy {
    /// Only the hydrogens created by the last closure.
    #[default]
    SaturationOnly,
    /// Every hydrogen that is not a branch member, including explicitly added ones.
    AllHydrogens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoleculeConfig {
    pub batch_mode: BatchMode,
    pub unlock_policy: UnlockPolicy,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialMoleculeConfig {
    batch_mode: Option<BatchMode>,
    unlock_policy: Option<UnlockPolicy>,
}

impl MoleculeConfig {
    pub fn builder() -> MoleculeConfigBuilder {
        MoleculeConfigBuilder::new()
    }

    /// Parses a TOML document; missing keys take their default value.
    ///
    /// ```toml
    /// batch-mode = "sequential"
    /// unlock-policy = "all-hydrogens"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let partial: PartialMoleculeConfig = toml::from_str(content)?;
        Ok(partial.into_builder().build())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }
}

impl PartialMoleculeConfig {
    fn into_builder(self) -> MoleculeConfigBuilder {
        let mut builder = MoleculeConfigBuilder::new();
        if let Some(mode) = self.batch_mode {
            builder = builder.batch_mode(mode);
        }
        if let Some(policy) = self.unlock_policy {
            builder = builder.unlock_policy(policy);
        }
        builder
    }
}

#[derive(Debug, Default)]
pub struct MoleculeConfigBuilder {
    batch_mode: Option<BatchMode>,
    unlock_policy: Option<UnlockPolicy>,
}

impl MoleculeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_mode(mut self, mode: BatchMode) -> Self {
        self.batch_mode = Some(mode);
        self
    }

    pub fn unlock_policy(mut self, policy: UnlockPolicy) -> Self {
        self.unlock_policy = Some(policy);
        self
    }

    pub fn build(self) -> MoleculeConfig {
        MoleculeConfig {
            batch_mode: self.batch_mode.unwrap_or_default(),
            unlock_policy: self.unlock_policy.unwrap_or_default(),
        }
    }
}
