//! Service configuration
//!
//! Settings come from environment variables (optionally seeded from a `.env`
//! file by `main`). Every setting has a default, so the service starts with
//! no configuration at all.
//!
//! # Environment Variables
//!
//! - `PORT` - Server port number (default: 8080)
//! - `SWAPI_PLANETS_URL` - First page of the planet catalog (default: "https://swapi.dev/api/planets/")
//! - `UPSTREAM_TIMEOUT_SECS` - Timeout applied to every outbound request (default: 30)
//! - `MAX_CATALOG_PAGES` - Pages fetched before pagination is aborted (default: 100)
//! - `RESIDENT_CONCURRENCY` - Resident lookups in flight per planet (default: 8)

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PLANETS_URL: &str = "https://swapi.dev/api/planets/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CATALOG_PAGES: usize = 100;
pub const DEFAULT_RESIDENT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub planets_url: String,
    pub upstream_timeout: Duration,
    pub max_catalog_pages: usize,
    pub resident_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            planets_url: DEFAULT_PLANETS_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_catalog_pages: DEFAULT_MAX_CATALOG_PAGES,
            resident_concurrency: DEFAULT_RESIDENT_CONCURRENCY,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    ///
    /// Invalid values are logged and replaced by their default. Zero is
    /// rejected for the timeout, the page ceiling and the concurrency.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let planets_url = lookup("SWAPI_PLANETS_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_PLANETS_URL.to_string());

        Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT, |_| true),
            planets_url,
            upstream_timeout: Duration::from_secs(parse_or(
                &lookup,
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
                |secs| *secs > 0,
            )),
            max_catalog_pages: parse_or(
                &lookup,
                "MAX_CATALOG_PAGES",
                DEFAULT_MAX_CATALOG_PAGES,
                |pages| *pages > 0,
            ),
            resident_concurrency: parse_or(
                &lookup,
                "RESIDENT_CONCURRENCY",
                DEFAULT_RESIDENT_CONCURRENCY,
                |n| *n > 0,
            ),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T, valid: impl Fn(&T) -> bool) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            tracing::warn!("ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }
    }
}
