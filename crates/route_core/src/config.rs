use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "routecheck.toml";

/// Project settings read from `routecheck.toml` at the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directories, relative to the project, that hold route files.
    #[serde(default = "default_routes_dirs")]
    pub routes_dirs: Vec<String>,

    /// Script and markup extensions that can be routes.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_routes_dirs() -> Vec<String> {
    vec!["app".to_string(), "src/app".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["mjs", "js", "jsx", "ts", "tsx"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes_dirs: default_routes_dirs(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Loads `routecheck.toml` from `project_dir`, falling back to defaults
    /// when the file does not exist.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, project_dir.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        config.check_extensions()?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn is_route_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|known| known == extension)
    }

    fn check_extensions(&self) -> Result<(), ConfigError> {
        match self
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            Some(bad) => Err(ConfigError::Extension(bad.clone())),
            None => Ok(()),
        }
    }
}
