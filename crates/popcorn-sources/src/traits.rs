use crate::error::CatalogError;
use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResult};

/// A movie-metadata provider that can be searched by text and looked up by id.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn catalog_name(&self) -> &str;

    /// Text search. Entries without a poster are already filtered out; catalog order is kept.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError>;

    /// Full record for one catalog id
    async fn movie_details(&self, id: &str) -> Result<MovieDetail, CatalogError>;
}
