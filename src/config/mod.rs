//! Configuration loading and management for the workshop allocator.
//!
//! This module provides functionality to load workload thresholds and
//! seed records (craftspeople, work orders) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use workshop_allocator::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overload warning at {}%", config.thresholds().overload_warning);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AllocationConfig, CraftspeopleSeed, Thresholds, WorkOrdersSeed};
