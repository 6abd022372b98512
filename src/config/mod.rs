//! Configuration loading and management for the allocation engine.
//!
//! This module provides the declarative allocation configuration (overhead
//! categories, compensatory-reason keywords, the header cell map) and a
//! loader for reading it from a YAML file.
//!
//! # Example
//!
//! ```
//! use invoice_engine::config::AllocationConfig;
//!
//! let config = AllocationConfig::default();
//! assert_eq!(config.hours_per_day, 8);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AllocationConfig, CodeRule, HeaderCellMap, OverheadCategory};
