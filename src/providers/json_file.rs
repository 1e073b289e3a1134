use crate::core::ScheduleSource;
use crate::core::config::AppConfig;
use crate::core::schedule::{FeeScheduleEntry, Order};
use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the fee schedule and orders from two JSON files on disk.
pub struct JsonFileSource {
    fees_path: PathBuf,
    orders_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(fees_path: impl Into<PathBuf>, orders_path: impl Into<PathBuf>) -> Self {
        JsonFileSource {
            fees_path: fees_path.into(),
            orders_path: orders_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.fees_path(), config.orders_path())
    }

    fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
        debug!("Reading {} from {}", what, path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;

        if contents.trim().is_empty() {
            return Err(anyhow!("{} file is empty: {}", what, path.display()));
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {what} file: {}", path.display()))
    }
}

impl ScheduleSource for JsonFileSource {
    fn fee_schedule(&self) -> Result<Vec<FeeScheduleEntry>> {
        let schedule: Vec<FeeScheduleEntry> = Self::read_json(&self.fees_path, "fee schedule")?;
        debug!("Loaded {} fee schedule entries", schedule.len());
        Ok(schedule)
    }

    fn orders(&self) -> Result<Vec<Order>> {
        let orders: Vec<Order> = Self::read_json(&self.orders_path, "orders")?;
        debug!("Loaded {} orders", orders.len());
        Ok(orders)
    }
}
