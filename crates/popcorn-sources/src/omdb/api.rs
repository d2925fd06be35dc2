use crate::error::CatalogError;
use popcorn_models::{parse_imdb_rating, parse_runtime_minutes, MovieDetail, SearchResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

const NOT_FOUND_FALLBACK: &str = "Movie not found";

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

// Every field is optional: a failed lookup comes back as {"Response":"False","Error":"..."}
#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Decode a search body and drop entries without artwork
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>, CatalogError> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::Decode(format!("search response: {}", e)))?;

    if !parsed.response.eq_ignore_ascii_case("true") {
        let message = parsed.error.unwrap_or_else(|| NOT_FOUND_FALLBACK.to_string());
        return Err(CatalogError::NotFound(message));
    }

    let items = parsed.search.unwrap_or_default();
    let total = items.len();
    let results: Vec<SearchResult> = items
        .into_iter()
        .map(|item| SearchResult {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: item.poster,
        })
        .filter(SearchResult::has_poster)
        .collect();

    debug!("Search returned {} entries, {} with posters", total, results.len());
    Ok(results)
}

/// Decode a lookup body. A missing poster is the catalog's "not found" signal.
pub fn parse_detail_response(body: &str, requested_id: &str) -> Result<MovieDetail, CatalogError> {
    let movie: OmdbMovie = serde_json::from_str(body)
        .map_err(|e| CatalogError::Decode(format!("detail response for {}: {}", requested_id, e)))?;

    let poster = match movie.poster {
        Some(poster) if !poster.trim().is_empty() => poster,
        _ => {
            let message = movie.error.unwrap_or_else(|| NOT_FOUND_FALLBACK.to_string());
            return Err(CatalogError::NotFound(message));
        }
    };

    let runtime = movie.runtime.unwrap_or_default();
    let imdb_rating = movie.imdb_rating.as_deref().map(parse_imdb_rating).unwrap_or(0.0);

    Ok(MovieDetail {
        id: movie.imdb_id.unwrap_or_else(|| requested_id.to_string()),
        title: movie.title.unwrap_or_default(),
        year: movie.year.unwrap_or_default(),
        poster_url: poster,
        runtime_minutes: parse_runtime_minutes(&runtime),
        runtime,
        imdb_rating,
        plot: movie.plot.unwrap_or_default(),
        release_date: movie.released.unwrap_or_default(),
        actors: movie.actors.unwrap_or_default(),
        director: movie.director.unwrap_or_default(),
        genre: movie.genre.unwrap_or_default(),
    })
}

/// Search the catalog by title text
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, CatalogError> {
    let body = fetch_body(client, base_url, &[("apikey", api_key), ("s", query)]).await?;
    parse_search_response(&body)
}

/// Look up one movie by catalog id
pub async fn get_movie(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: &str,
) -> Result<MovieDetail, CatalogError> {
    let body = fetch_body(client, base_url, &[("apikey", api_key), ("i", id)]).await?;
    parse_detail_response(&body, id)
}

async fn fetch_body(client: &Client, base_url: &str, params: &[(&str, &str)]) -> Result<String, CatalogError> {
    // Never log the api key
    let lookup: Vec<&(&str, &str)> = params.iter().filter(|(name, _)| *name != "apikey").collect();
    debug!("GET {} {:?}", base_url, lookup);

    let response = client
        .get(base_url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            warn!("Catalog request failed: {}", e);
            CatalogError::Network(e.to_string())
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!("Catalog returned HTTP {}", status);
        return Err(CatalogError::Network(format!("HTTP {}", status)));
    }

    response
        .text()
        .await
        .map_err(|e| CatalogError::Network(format!("Failed to read response body: {}", e)))
}
