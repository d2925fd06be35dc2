use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::MovieCatalog;
use async_trait::async_trait;
use popcorn_config::CatalogConfig;
use popcorn_models::{MovieDetail, SearchResult};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Client for the OMDb API (or any service speaking the same query protocol)
#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim().to_string(),
            api_key: config.api_key.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    fn catalog_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        let results = api::search(&self.client, &self.base_url, &self.api_key, query).await?;
        info!("Catalog search '{}' returned {} results", query, results.len());
        Ok(results)
    }

    async fn movie_details(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        api::get_movie(&self.client, &self.base_url, &self.api_key, id).await
    }
}
