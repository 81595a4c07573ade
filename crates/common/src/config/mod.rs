//! Configuration management for Data Insights Hub
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Default values
//!
//! Every field has a default, so the site and the thumbnail tools run
//! without any configuration file.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

use crate::DEFAULT_SCREENSHOT_SERVICE;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    /// Site rendering and export configuration
    #[serde(default)]
    #[validate(nested)]
    pub site: SiteConfig,

    /// Thumbnail generation and resolution configuration
    #[serde(default)]
    #[validate(nested)]
    pub thumbnails: ThumbnailConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Rate limiting configuration
    #[serde(default)]
    #[validate(nested)]
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SiteConfig {
    /// Path prefix the site is served under, e.g. `/hub` (empty for root)
    #[serde(default)]
    pub base_path: String,

    /// Document title
    #[serde(default = "default_title")]
    pub title: String,

    /// Number of featured cards shown above the catalog grid
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,

    /// Number of tags shown on a card
    #[serde(default = "default_card_tag_limit")]
    pub card_tag_limit: usize,

    /// Output directory of `site export`
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ThumbnailConfig {
    /// Directory holding pre-generated thumbnails
    #[serde(default = "default_thumbnail_dir")]
    pub dir: PathBuf,

    /// Extension of optimized thumbnails (`webp`, `jpg` or `png`)
    #[serde(default = "default_thumbnail_extension")]
    #[validate(length(min = 1))]
    pub extension: String,

    /// Screenshot service base URL
    #[serde(default = "default_service_base")]
    #[validate(url)]
    pub service_base: String,

    /// Width of remote fallback thumbnails
    #[serde(default = "default_remote_width")]
    #[validate(range(min = 1))]
    pub remote_width: u32,

    /// Crop height of remote fallback thumbnails
    #[serde(default = "default_remote_crop")]
    #[validate(range(min = 1))]
    pub remote_crop: u32,

    /// Viewport width used when capturing screenshots
    #[serde(default = "default_viewport_width")]
    #[validate(range(min = 1))]
    pub viewport_width: u32,

    /// Viewport height used when capturing screenshots
    #[serde(default = "default_viewport_height")]
    #[validate(range(min = 1))]
    pub viewport_height: u32,

    /// Per-target capture timeout in seconds
    #[serde(default = "default_capture_timeout")]
    #[validate(range(min = 1))]
    pub capture_timeout_secs: u64,

    /// Width of optimized thumbnails (never enlarged)
    #[serde(default = "default_target_width")]
    #[validate(range(min = 1))]
    pub target_width: u32,

    /// Encoder quality for lossy formats
    #[serde(default = "default_quality")]
    #[validate(range(min = 1, max = 100))]
    pub quality: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default)]
    pub metrics_port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RateLimitConfig {
    /// Requests per second
    #[serde(default = "default_rate_limit")]
    #[validate(range(min = 1))]
    pub requests_per_second: u32,

    /// Burst capacity
    #[serde(default = "default_burst")]
    #[validate(range(min = 1))]
    pub burst: u32,

    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }
fn default_request_timeout() -> u64 { 30 }
fn default_title() -> String { "Data Insights Hub".to_string() }
fn default_featured_limit() -> usize { 3 }
fn default_card_tag_limit() -> usize { 3 }
fn default_export_dir() -> PathBuf { PathBuf::from("out") }
fn default_thumbnail_dir() -> PathBuf { PathBuf::from("public/thumbnails") }
fn default_thumbnail_extension() -> String { "webp".to_string() }
fn default_service_base() -> String { DEFAULT_SCREENSHOT_SERVICE.to_string() }
fn default_remote_width() -> u32 { 600 }
fn default_remote_crop() -> u32 { 400 }
fn default_viewport_width() -> u32 { 1280 }
fn default_viewport_height() -> u32 { 800 }
fn default_capture_timeout() -> u64 { 30 }
fn default_target_width() -> u32 { 400 }
fn default_quality() -> u8 { 75 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_rate_limit() -> u32 { 50 }
fn default_burst() -> u32 { 100 }
fn default_enabled() -> bool { true }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.checked()
    }

    /// Load from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(self)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

impl SiteConfig {
    /// Prefix `path` (which must start with `/`) with the base path
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.base_path.trim_end_matches('/'), path)
    }
}

impl ThumbnailConfig {
    /// Get capture timeout as Duration
    pub fn capture_timeout(&self) -> Duration {
        Duration::from_secs(self.capture_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            title: default_title(),
            featured_limit: default_featured_limit(),
            card_tag_limit: default_card_tag_limit(),
            export_dir: default_export_dir(),
        }
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            dir: default_thumbnail_dir(),
            extension: default_thumbnail_extension(),
            service_base: default_service_base(),
            remote_width: default_remote_width(),
            remote_crop: default_remote_crop(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            capture_timeout_secs: default_capture_timeout(),
            target_width: default_target_width(),
            quality: default_quality(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: 0,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rate_limit(),
            burst: default_burst(),
            enabled: default_enabled(),
        }
    }
}
