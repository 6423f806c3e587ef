//! Configuration management for CollabNet services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Data source locations
    #[serde(default)]
    pub data: DataConfig,

    /// Network construction configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Excellence-node criteria
    #[serde(default)]
    pub excellence: ExcellenceConfig,

    /// Hiring analysis configuration
    #[serde(default)]
    pub hire: HireConfig,

    /// Record fetcher configuration
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Faculty roster CSV
    #[serde(default = "default_roster_path")]
    pub roster_path: String,

    /// Directory of per-faculty bibliographic XML records
    #[serde(default = "default_records_dir")]
    pub records_dir: String,

    /// Candidate roster CSV for the hiring analysis (optional)
    pub candidate_roster_path: Option<String>,

    /// Directory of per-candidate bibliographic XML records
    pub candidate_records_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// First year of the collaboration window
    #[serde(default = "default_first_year")]
    pub first_year: i32,

    /// Last year of the collaboration window (inclusive)
    #[serde(default = "default_last_year")]
    pub last_year: i32,

    /// Spring-layout output range: positions land in [-scale, scale]
    #[serde(default = "default_layout_scale")]
    pub layout_scale: f64,

    /// Seed for the layout RNG
    #[serde(default)]
    pub layout_seed: u64,

    /// Edge-swap rounds per edge when building small-world references
    #[serde(default = "default_smallworld_niter")]
    pub smallworld_niter: usize,

    /// Number of random reference graphs per component
    #[serde(default = "default_smallworld_nrand")]
    pub smallworld_nrand: usize,

    /// Seed for the small-world reference RNG
    #[serde(default)]
    pub smallworld_seed: u64,

    /// Iteration cap for eigenvector centrality
    #[serde(default = "default_eigenvector_max_iter")]
    pub eigenvector_max_iter: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExcellenceConfig {
    /// Curated list of top venues (case-insensitive match)
    #[serde(default)]
    pub venues: Vec<String>,

    /// Only publications from this year onward count
    #[serde(default = "default_excellence_since")]
    pub since_year: i32,

    /// Minimum qualifying publications
    #[serde(default = "default_excellence_min_papers")]
    pub min_papers: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HireConfig {
    /// First year of the hiring window
    #[serde(default = "default_hire_from")]
    pub from_year: i32,

    /// Last year of the hiring window (inclusive)
    #[serde(default = "default_hire_to")]
    pub to_year: i32,

    /// Size of the top-degree candidate pool
    #[serde(default = "default_hire_pool")]
    pub pool_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Base URL for bibliography person pages
    #[serde(default = "default_fetch_base_url")]
    pub base_url: String,

    /// Politeness delay between requests in milliseconds
    #[serde(default = "default_fetch_delay")]
    pub delay_ms: u64,

    /// Maximum retries per download
    #[serde(default = "default_fetch_retries")]
    pub max_retries: u32,

    /// Concurrent downloads
    #[serde(default = "default_fetch_concurrency")]
    pub concurrency: usize,

    /// Request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
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
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per second
    #[serde(default = "default_rate_limit")]
    pub requests_per_second: u32,

    /// Burst capacity
    #[serde(default = "default_burst")]
    pub burst: u32,

    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 30 }
fn default_shutdown_timeout() -> u64 { 30 }
fn default_roster_path() -> String { "data/faculty.csv".to_string() }
fn default_records_dir() -> String { "data/records".to_string() }
fn default_first_year() -> i32 { crate::DEFAULT_FIRST_YEAR }
fn default_last_year() -> i32 { crate::DEFAULT_LAST_YEAR }
fn default_layout_scale() -> f64 { 2.0 }
fn default_smallworld_niter() -> usize { 1 }
fn default_smallworld_nrand() -> usize { 1 }
fn default_eigenvector_max_iter() -> usize { 600 }
fn default_excellence_since() -> i32 { 2015 }
fn default_excellence_min_papers() -> usize { 3 }
fn default_hire_from() -> i32 { 2018 }
fn default_hire_to() -> i32 { 2020 }
fn default_hire_pool() -> usize { 100 }
fn default_fetch_base_url() -> String { "https://dblp.org/pid".to_string() }
fn default_fetch_delay() -> u64 { 1000 }
fn default_fetch_retries() -> u32 { 3 }
fn default_fetch_concurrency() -> usize { 4 }
fn default_fetch_timeout() -> u64 { 30 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "collabnet".to_string() }
fn default_rate_limit() -> u32 { 50 }
fn default_burst() -> u32 { 100 }
fn default_enabled() -> bool { true }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
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

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs)
    }

    /// Years covered by the year networks, first to last inclusive
    pub fn year_range(&self) -> std::ops::RangeInclusive<i32> {
        self.network.first_year..=self.network.last_year
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            roster_path: default_roster_path(),
            records_dir: default_records_dir(),
            candidate_roster_path: None,
            candidate_records_dir: None,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            first_year: default_first_year(),
            last_year: default_last_year(),
            layout_scale: default_layout_scale(),
            layout_seed: 0,
            smallworld_niter: default_smallworld_niter(),
            smallworld_nrand: default_smallworld_nrand(),
            smallworld_seed: 0,
            eigenvector_max_iter: default_eigenvector_max_iter(),
        }
    }
}

impl Default for ExcellenceConfig {
    fn default() -> Self {
        Self {
            venues: Vec::new(),
            since_year: default_excellence_since(),
            min_papers: default_excellence_min_papers(),
        }
    }
}

impl Default for HireConfig {
    fn default() -> Self {
        Self {
            from_year: default_hire_from(),
            to_year: default_hire_to(),
            pool_size: default_hire_pool(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_fetch_base_url(),
            delay_ms: default_fetch_delay(),
            max_retries: default_fetch_retries(),
            concurrency: default_fetch_concurrency(),
            timeout_secs: default_fetch_timeout(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
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

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            network: NetworkConfig::default(),
            excellence: ExcellenceConfig::default(),
            hire: HireConfig::default(),
            fetch: FetchConfig::default(),
            observability: ObservabilityConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.network.first_year, 2000);
        assert_eq!(config.network.last_year, 2021);
        assert_eq!(config.hire.pool_size, 100);
    }

    #[test]
    fn test_year_range() {
        let config = AppConfig::default();
        let years: Vec<i32> = config.year_range().collect();
        assert_eq!(years.first(), Some(&2000));
        assert_eq!(years.last(), Some(&2021));
    }

    #[test]
    fn test_excellence_defaults() {
        let config = AppConfig::default();
        assert!(config.excellence.venues.is_empty());
        assert_eq!(config.excellence.since_year, 2015);
        assert_eq!(config.excellence.min_papers, 3);
    }
}
