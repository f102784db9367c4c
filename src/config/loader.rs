//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading allocation
//! settings and seed records from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{AllocationError, AllocationResult};
use crate::models::{Craftsperson, WorkOrder};

use super::types::{AllocationConfig, CraftspeopleSeed, Thresholds, WorkOrdersSeed};

/// Loads and provides access to allocation configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── allocation.yaml     # Workload thresholds
/// ├── craftspeople.yaml   # Craftsperson roster (seed)
/// └── work_orders.yaml    # Pending work orders (seed)
/// ```
///
/// # Example
///
/// ```no_run
/// use workshop_allocator::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Tier 1 limit: {}", loader.thresholds().tier_one_max_workload);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AllocationConfig,
}

impl ConfigLoader {
    /// Loads `allocation.yaml` from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if the file is
    /// missing (`ConfigNotFound`) or is not valid YAML (`ConfigParseError`).
    pub fn load<P: AsRef<Path>>(path: P) -> AllocationResult<Self> {
        let config = Self::load_yaml::<AllocationConfig>(&path.as_ref().join("allocation.yaml"))?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AllocationConfig) -> Self {
        Self { config }
    }

    /// Loads the craftsperson roster from `craftspeople.yaml`.
    ///
    /// A skill level outside 1..=3 or a reversed absence fails the load with
    /// `ConfigParseError`.
    pub fn load_craftspeople<P: AsRef<Path>>(path: P) -> AllocationResult<Vec<Craftsperson>> {
        let file = path.as_ref().join("craftspeople.yaml");
        let seed = Self::load_yaml::<CraftspeopleSeed>(&file)?;
        Self::check_records(&file, &seed.craftspeople, Craftsperson::validate)?;
        Ok(seed.craftspeople)
    }

    /// Loads pending work orders from `work_orders.yaml`.
    ///
    /// A `workload_impact` above 100 fails the load with `ConfigParseError`.
    pub fn load_work_orders<P: AsRef<Path>>(path: P) -> AllocationResult<Vec<WorkOrder>> {
        let file = path.as_ref().join("work_orders.yaml");
        let seed = Self::load_yaml::<WorkOrdersSeed>(&file)?;
        Self::check_records(&file, &seed.work_orders, WorkOrder::validate)?;
        Ok(seed.work_orders)
    }

    /// Runs a record validator over every loaded record.
    fn check_records<T>(
        path: &Path,
        records: &[T],
        validate: impl Fn(&T) -> Result<(), String>,
    ) -> AllocationResult<()> {
        records
            .iter()
            .try_for_each(validate)
            .map_err(|message| AllocationError::ConfigParseError {
                path: path.display().to_string(),
                message,
            })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AllocationResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AllocationError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| AllocationError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying allocation configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Returns the workload thresholds.
    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }
}
