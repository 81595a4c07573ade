//! Data Insights Hub Common Library
//!
//! Shared code for the site server and the offline thumbnail tools:
//! - The static project catalog and its category metadata
//! - Catalog validation and query functions
//! - View models (catalog filtering, project detail, thumbnail resolution)
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod catalog;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod query;
pub mod view;

// Re-export commonly used types
pub use catalog::{Category, CategoryInfo, Project, Stat, PROJECTS};
pub use config::AppConfig;
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Screenshot service used for remote thumbnails
pub const DEFAULT_SCREENSHOT_SERVICE: &str = "https://image.thum.io/get";

/// Session storage key for the catalog scroll offset
pub const SCROLL_STORAGE_KEY: &str = "datahub:catalog-scroll";
