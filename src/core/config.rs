use crate::core::defaults::DefaultTable;
use crate::core::engine::{MAX_ITERATIONS, Solver, TOLERANCE};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SolverConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_max_iterations() -> u32 {
    MAX_ITERATIONS
}

fn default_tolerance() -> f64 {
    TOLERANCE
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: MAX_ITERATIONS,
            tolerance: TOLERANCE,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub solver: SolverConfig,
    /// Default percentages that replace the built-in ones, by row name.
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
}

fn default_currency() -> String {
    "BRL".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: default_currency(),
            solver: SolverConfig::default(),
            overrides: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, or built-in defaults when
    /// no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "markup", "markup")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn solver(&self) -> Result<Solver> {
        Solver::new(self.solver.max_iterations, self.solver.tolerance)
            .context("Invalid solver settings in config")
    }

    pub fn default_table(&self) -> Result<DefaultTable> {
        DefaultTable::with_overrides(&self.overrides)
            .context("Invalid percentage overrides in config")
    }
}
