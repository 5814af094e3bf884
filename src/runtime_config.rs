//! # Runtime Configuration Module
//!
//! Environment-based configuration for the server process. CLI flags in
//! [`crate::cli`] override these values.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PORT` | `3000` | Listen port |
//! | `PET_HOST` | `0.0.0.0` | Bind address |
//! | `PET_STACK_SIZE` | `0x4000` | Coroutine stack size, decimal or `0x` hex |
//! | `PET_PUBLIC_SERVERS` | none | Extra OpenAPI server URLs, comma separated |
//!
//! Values that fail to parse fall back to the default.
//!
//! ```rust
//! use pet_registry::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Listening on {}", config.bind_addr());
//! ```

use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub port: u16,
    pub host: String,
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    /// Server URLs advertised in the OpenAPI document after the local one
    pub public_servers: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            stack_size: DEFAULT_STACK_SIZE,
            public_servers: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            host: lookup("PET_HOST")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.host),
            stack_size: lookup("PET_STACK_SIZE")
                .and_then(|v| parse_size(&v))
                .unwrap_or(defaults.stack_size),
            public_servers: lookup("PET_PUBLIC_SERVERS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        }
    }

    /// `host:port` string suitable for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Parse a byte size given in decimal or `0x`-prefixed hex.
#[must_use]
pub fn parse_size(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

/// Split a comma-separated list, dropping empty entries.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
