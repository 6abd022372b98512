//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the allocation
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::AllocationConfig;

/// Loads and provides access to the allocation configuration.
///
/// # Example
///
/// ```no_run
/// use invoice_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/allocation.yaml").unwrap();
/// println!("{} overhead categories", loader.config().overhead.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AllocationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when the file cannot be read
    /// and [`EngineError::ConfigParseError`] when it is not valid YAML for
    /// an [`AllocationConfig`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Loads configuration from the given path, falling back to the built-in
    /// defaults when the file does not exist. Parse errors still propagate.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        match Self::load(path) {
            Ok(loader) => Ok(loader),
            Err(EngineError::ConfigNotFound { .. }) => Ok(Self {
                config: AllocationConfig::default(),
            }),
            Err(other) => Err(other),
        }
    }

    /// Returns the underlying allocation configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> AllocationConfig {
        self.config
    }
}
