use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

const DEFAULT_DATA_PATH: &str = "data";
const FEES_FILE_NAME: &str = "fees.json";
const ORDERS_FILE_NAME: &str = "orders.json";

fn default_currency_symbol() -> String {
    "$".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Directory holding `fees.json` and `orders.json`.
    pub data_path: Option<String>,
    pub fees_file: Option<String>,
    pub orders_file: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: None,
            fees_file: None,
            orders_file: None,
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl AppConfig {
    /// Loads the per-user config, falling back to defaults when none exists.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "printfee", "printfee")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(self.data_path.as_deref().unwrap_or(DEFAULT_DATA_PATH))
    }

    pub fn fees_path(&self) -> PathBuf {
        self.fees_file
            .as_ref()
            .map_or_else(|| self.data_dir().join(FEES_FILE_NAME), PathBuf::from)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.orders_file
            .as_ref()
            .map_or_else(|| self.data_dir().join(ORDERS_FILE_NAME), PathBuf::from)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
