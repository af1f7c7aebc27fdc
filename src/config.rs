//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for the cached most-popular listing, 0 = never expire
    pub popular_posts_ttl: u64,
    /// Simulated post store latency in milliseconds
    pub store_latency_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `POPULAR_POSTS_TTL` - Cache TTL for popular posts in seconds (default: 10)
    /// - `STORE_LATENCY_MS` - Simulated store latency in milliseconds (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            popular_posts_ttl: env_or("POPULAR_POSTS_TTL", defaults.popular_posts_ttl),
            store_latency_ms: env_or("STORE_LATENCY_MS", defaults.store_latency_ms),
        }
    }

    /// TTL to store the most-popular listing with. None = no expiry.
    pub fn popular_posts_ttl(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.popular_posts_ttl)).filter(|ttl| !ttl.is_zero())
    }

    /// Latency the post store simulates per query.
    pub fn store_latency(&self) -> Duration {
        Duration::from_millis(self.store_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            popular_posts_ttl: 10,
            store_latency_ms: 3000,
        }
    }
}

/// Parses an environment variable, falling back to `default` if unset or invalid.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
