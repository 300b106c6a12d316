//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Preview and reservation lifetimes.
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Expiry sweep configuration.
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Lifetimes for staged previews and their reservations/holds.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Seconds a preview snapshot stays confirmable.
    #[serde(default = "default_preview_ttl")]
    pub snapshot_ttl_secs: u64,
    /// Seconds a number reservation stays HELD before the sweep may expire it.
    #[serde(default = "default_reservation_ttl")]
    pub reservation_ttl_secs: u64,
    /// Seconds a funds hold stays active.
    #[serde(default = "default_hold_ttl")]
    pub hold_ttl_secs: u64,
}

fn default_preview_ttl() -> u64 {
    900 // 15 minutes
}

fn default_reservation_ttl() -> u64 {
    900
}

fn default_hold_ttl() -> u64 {
    900
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            snapshot_ttl_secs: default_preview_ttl(),
            reservation_ttl_secs: default_reservation_ttl(),
            hold_ttl_secs: default_hold_ttl(),
        }
    }
}

/// Expiry sweep configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Seconds between sweep passes.
    #[serde(default = "default_sweep_interval")]
    pub interval_secs: u64,
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_sweep_interval(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BAHI").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_defaults() {
        let preview = PreviewConfig::default();
        assert_eq!(preview.snapshot_ttl_secs, 900);
        assert_eq!(preview.reservation_ttl_secs, 900);
        assert_eq!(preview.hold_ttl_secs, 900);
    }

    #[test]
    fn test_sweep_defaults() {
        let sweep = SweepConfig::default();
        assert_eq!(sweep.interval_secs, 60);
    }
}
