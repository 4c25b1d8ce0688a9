//! Upstream catalog client and shared application state
//!
//! `SwapiClient` walks the paginated planet catalog and resolves resident
//! references into names. It holds one pooled `reqwest::Client`, so a single
//! instance is shared by every request handler through `AppState`.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::UpstreamError;
use crate::model::{CatalogPage, PlanetRecord, ResidentRecord};

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub swapi: Arc<SwapiClient>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Ok(Self {
            swapi: Arc::new(SwapiClient::new(config)?),
        })
    }
}

/// HTTP client for the planet catalog and the resident resources it links to
#[derive(Debug, Clone)]
pub struct SwapiClient {
    client: Client,
    planets_url: String,
    max_pages: usize,
    resident_concurrency: usize,
}

impl SwapiClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let client = build_http_client(config.upstream_timeout).map_err(|source| {
            UpstreamError::Transport {
                url: config.planets_url.clone(),
                source,
            }
        })?;

        Ok(Self {
            client,
            planets_url: config.planets_url.clone(),
            max_pages: config.max_catalog_pages,
            resident_concurrency: config.resident_concurrency.max(1),
        })
    }

    /// Fetches every planet of the catalog, following `next` links
    ///
    /// Pages are requested one after another starting at the configured root.
    /// The first failing page aborts the walk and nothing is returned. The
    /// walk also fails once `max_pages` pages have been read without reaching
    /// the end, or when a `next` link points to a page already visited.
    pub async fn fetch_all_planets(&self) -> Result<Vec<PlanetRecord>, UpstreamError> {
        let mut planets = Vec::new();
        let mut visited = HashSet::new();
        let mut next_url = Some(self.planets_url.clone());

        while let Some(url) = next_url.take() {
            // Fail closed instead of trusting an endless `next` chain
            if visited.len() >= self.max_pages {
                return Err(UpstreamError::PageLimit {
                    limit: self.max_pages,
                });
            }
            if !visited.insert(url.clone()) {
                return Err(UpstreamError::PaginationCycle { url });
            }

            let page: CatalogPage = self.get_json(&url).await?;
            debug!(
                "catalog page {} returned {} planets (count={})",
                url,
                page.results.len(),
                page.count
            );

            // Advance before consuming the page's results
            next_url = page.next_page().map(str::to_string);
            planets.extend(page.results);
        }

        info!(
            "fetched {} planets across {} catalog pages",
            planets.len(),
            visited.len()
        );
        Ok(planets)
    }

    /// Resolves resident references into names, keeping their order
    ///
    /// Up to `resident_concurrency` lookups run at once. Any failed lookup
    /// fails the whole resolution and the outstanding ones are dropped.
    pub async fn resolve_resident_names(
        &self,
        references: &[String],
    ) -> Result<Vec<String>, UpstreamError> {
        stream::iter(references.iter().cloned())
            .map(|reference: String| async move {
                let resident: ResidentRecord = self.get_json(&reference).await?;
                Ok::<_, UpstreamError>(resident.name)
            })
            .buffered(self.resident_concurrency)
            .try_collect()
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let transport = |source: reqwest::Error| UpstreamError::Transport {
            url: url.to_string(),
            source,
        };

        // Non-2xx statuses are transport failures, like a refused connection
        let body = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(transport)?
            .bytes()
            .await
            .map_err(transport)?;

        serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}
