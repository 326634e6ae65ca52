use serde::Deserialize;

use irisml_core::error::{Result, ServeError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub model: ModelSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            model: ModelSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ServeError::BadRequest("version must be 1".into()));
        }
        self.model.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    /// Model name used in metric labels.
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Path of the persisted model artifact.
    #[serde(default = "default_model_path")]
    pub path: String,

    /// Number of bagged trees in the ensemble.
    #[serde(default = "default_trees")]
    pub trees: usize,

    /// Maximum depth of each tree.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// RNG seed for the train/holdout split and bootstrap sampling.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            path: default_model_path(),
            trees: default_trees(),
            max_depth: default_max_depth(),
            seed: default_seed(),
        }
    }
}

impl ModelSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ServeError::BadRequest("model.name must not be empty".into()));
        }
        if !(1..=1000).contains(&self.trees) {
            return Err(ServeError::BadRequest(
                "model.trees must be between 1 and 1000".into(),
            ));
        }
        if !(1..=64).contains(&self.max_depth) {
            return Err(ServeError::BadRequest(
                "model.max_depth must be between 1 and 64".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_model_name() -> String {
    "iris_classifier".into()
}
fn default_model_path() -> String {
    "iris_model.bin".into()
}
fn default_trees() -> usize {
    100
}
fn default_max_depth() -> usize {
    10
}
fn default_seed() -> u64 {
    42
}
