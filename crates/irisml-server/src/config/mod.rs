//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use irisml_core::error::{Result, ServeError};

pub use schema::{ModelSection, ServerConfig, ServerSection};

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ServeError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| ServeError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the config file when present, otherwise fall back to built-in
/// defaults. A file that exists but fails to parse or validate is an error.
pub fn load_or_default(path: &str) -> Result<ServerConfig> {
    if Path::new(path).exists() {
        load_from_file(path)
    } else {
        tracing::info!(%path, "config file not found, using defaults");
        Ok(ServerConfig::default())
    }
}
