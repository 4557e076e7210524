//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::db::ConnectionOptions;

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    100
}

fn default_pool_size() -> u32 {
    10
}

fn default_busy_timeout_ms() -> u64 {
    30_000
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Page size used when the caller does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound on the page size a caller may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    /// Run content and count queries on separate connections in parallel.
    #[serde(default)]
    pub concurrent_count: bool,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// How long a connection waits on a locked database file.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, the optional `config/{app_env}.yaml`
    /// profile and `APP_*` environment overrides, in that order.
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize::<ServerConfig>()
    }

    /// Pool settings for this server. Concurrent counting holds two
    /// connections per search, so the pool never drops below two then.
    pub fn connection_options(&self) -> ConnectionOptions {
        let min_pool = if self.concurrent_count { 2 } else { 1 };
        ConnectionOptions {
            busy_timeout: Some(Duration::from_millis(self.busy_timeout_ms)),
            pool_size: self.pool_size.max(min_pool),
            ..ConnectionOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(concurrent_count: bool, pool_size: u32) -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".into(),
            port: 8080,
            database_url: "app.db".into(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            concurrent_count,
            pool_size,
            busy_timeout_ms: 5_000,
        }
    }

    #[test]
    fn concurrent_count_keeps_two_connections() {
        assert_eq!(config(true, 1).connection_options().pool_size, 2);
        assert_eq!(config(false, 1).connection_options().pool_size, 1);
        assert_eq!(config(true, 8).connection_options().pool_size, 8);
    }

    #[test]
    fn busy_timeout_comes_from_config() {
        let options = config(false, 4).connection_options();
        assert_eq!(options.busy_timeout, Some(Duration::from_secs(5)));
        assert!(options.enable_foreign_keys);
    }
}
