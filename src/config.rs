use anyhow::Context;
use serde::Deserialize;
use std::{
    collections::HashMap,
    path::Path,
};
use tic_tac_toe::Mode;

/// The config
#[derive(Deserialize, Debug, Default)]
pub struct Config {
    /// The mode new games start in
    #[serde(default)]
    pub mode: Mode,

    /// The seed for game rngs.
    ///
    /// Games use entropy if this is missing.
    /// Optimal games keep their rng, so a later switch to random play is seeded too.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

impl Config {
    /// Load a config from a path
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        std::fs::read(path)
            .with_context(|| format!("failed to read config from '{}'", path.display()))
            .and_then(|b| Self::load_from_bytes(&b))
    }

    /// Load a config from bytes
    pub fn load_from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let s = std::str::from_utf8(bytes).context("config is not utf8")?;
        s.parse()
    }

    /// Validate a config
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut unknown_keys: Vec<_> = self.extra.keys().collect();
        unknown_keys.sort();

        unknown_keys
            .into_iter()
            .map(|key| ValidationWarning::UnknownKey(key.clone()))
            .collect()
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).context("failed to parse config")
    }
}

/// A config issue that does not stop the program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationWarning {
    /// The key is not used.
    #[error("unknown config key '{0}'")]
    UnknownKey(String),
}
