use crate::error::ControllerError;
use crate::selection::Selection;
use crate::store::KeyValueStore;
use crate::watched::WatchedList;
use chrono::Utc;
use popcorn_config::Config;
use popcorn_models::{MovieDetail, RatingDraft, SearchResult, WatchedEntry, WatchedSummary};
use popcorn_sources::{CatalogError, MovieCatalog};
use tracing::{debug, info, warn};

/// Handle for one issued search. Only the most recently issued ticket may update state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    /// The trimmed query to send to the catalog
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Handle for one detail lookup, tied to the selection it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    id: String,
}

impl DetailTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub results: Vec<SearchResult>,
    pub is_loading: bool,
    pub error: Option<String>,
    issued: u64,
}

/// State of the detail pane. Reset on every selection change.
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub movie: Option<MovieDetail>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub rating: RatingDraft,
    issued: u64,
}

/// Input-device signals the controller reacts to regardless of focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    Escape,
}

/// Owns every piece of mutable application state and mediates between
/// the catalog, the persisted watched list and the view.
pub struct AppController<C: MovieCatalog, S: KeyValueStore> {
    catalog: C,
    watched: WatchedList<S>,
    search: SearchState,
    selection: Selection,
    detail: DetailState,
    app_title: String,
    min_query_len: usize,
    max_rating: u8,
}

impl<C: MovieCatalog, S: KeyValueStore> AppController<C, S> {
    /// Build the controller and load the watched list from `store`
    pub fn new(catalog: C, store: S, config: &Config) -> Self {
        Self {
            catalog,
            watched: WatchedList::load(store),
            search: SearchState::default(),
            selection: Selection::default(),
            detail: DetailState::default(),
            app_title: config.ui.app_title.clone(),
            min_query_len: config.ui.min_query_len,
            max_rating: config.rating.max_rating,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn detail_state(&self) -> &DetailState {
        &self.detail
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn watched(&self) -> &WatchedList<S> {
        &self.watched
    }

    pub fn summary(&self) -> WatchedSummary {
        self.watched.summary()
    }

    pub fn max_rating(&self) -> u8 {
        self.max_rating
    }

    // ---------------------------------------------------------------------
    // Search
    // ---------------------------------------------------------------------

    /// Start a search. Queries shorter than the minimum are skipped without touching state.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            debug!("Ignoring search '{}': shorter than {} characters", query, self.min_query_len);
            return None;
        }

        self.search.issued += 1;
        self.search.is_loading = true;
        self.search.error = None;

        Some(SearchTicket {
            generation: self.search.issued,
            query: query.to_string(),
        })
    }

    /// Apply a search outcome. Returns false when a newer search superseded `ticket`.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<SearchResult>, CatalogError>,
    ) -> bool {
        if ticket.generation != self.search.issued {
            debug!(
                "Dropping stale results for '{}' (generation {}, latest {})",
                ticket.query, ticket.generation, self.search.issued
            );
            return false;
        }

        self.search.is_loading = false;
        match result {
            Ok(results) => {
                debug!("Search '{}' produced {} results", ticket.query, results.len());
                self.search.results = results;
            }
            Err(e) if e.is_not_found() => {
                info!("No results for '{}': {}", ticket.query, e);
                self.search.error = Some(e.to_string());
                self.search.results.clear();
            }
            Err(e) => {
                warn!("Search '{}' failed: {} ({})", ticket.query, e, e.detail());
                self.search.error = Some(e.to_string());
                self.search.results.clear();
            }
        }
        true
    }

    /// Issue a search against the catalog and apply its outcome. Returns false if skipped.
    pub async fn search(&mut self, query: &str) -> bool {
        let Some(ticket) = self.begin_search(query) else {
            return false;
        };
        let result = self.catalog.search(ticket.query()).await;
        self.complete_search(ticket, result)
    }

    // ---------------------------------------------------------------------
    // Selection and detail
    // ---------------------------------------------------------------------

    /// Toggle the selection on `id`. Returns a ticket when a detail lookup is needed.
    pub fn select(&mut self, id: &str) -> Option<DetailTicket> {
        self.selection.select(id);
        self.reset_detail();
        self.search.error = None;

        let id = self.selection.selected_id()?.to_string();
        self.detail.is_loading = true;
        debug!("Viewing {}", id);
        Some(DetailTicket {
            generation: self.detail.issued,
            id,
        })
    }

    pub fn close(&mut self) {
        if self.selection.is_viewing() {
            debug!("Closing detail pane");
        }
        self.selection.close();
        self.reset_detail();
        self.search.error = None;
    }

    pub fn handle_signal(&mut self, signal: UiSignal) {
        match signal {
            UiSignal::Escape => self.close(),
        }
    }

    /// Apply a detail lookup. Returns false when the selection moved on since `ticket` was issued.
    pub fn complete_detail(&mut self, ticket: DetailTicket, result: Result<MovieDetail, CatalogError>) -> bool {
        if ticket.generation != self.detail.issued || self.selection.selected_id() != Some(ticket.id.as_str()) {
            debug!("Dropping stale detail for {}", ticket.id);
            return false;
        }

        self.detail.is_loading = false;
        match result {
            Ok(movie) => {
                debug!("Loaded detail for {} ({})", movie.id, movie.title);
                self.detail.movie = Some(movie);
            }
            Err(e) => {
                warn!("Detail lookup for {} failed: {} ({})", ticket.id, e, e.detail());
                self.detail.error = Some(e.to_string());
            }
        }
        true
    }

    /// Toggle the selection on `id` and fetch its detail when it opened
    pub async fn select_and_load(&mut self, id: &str) {
        if let Some(ticket) = self.select(id) {
            let result = self.catalog.movie_details(ticket.id()).await;
            self.complete_detail(ticket, result);
        }
    }

    /// "Movie | <title>" while a loaded movie is open, the application title otherwise
    pub fn window_title(&self) -> String {
        match (&self.selection, &self.detail.movie) {
            (Selection::Viewing(_), Some(movie)) if !movie.title.is_empty() => {
                format!("Movie | {}", movie.title)
            }
            _ => self.app_title.clone(),
        }
    }

    fn reset_detail(&mut self) {
        self.detail.issued += 1;
        self.detail.movie = None;
        self.detail.is_loading = false;
        self.detail.error = None;
        self.detail.rating = RatingDraft::new();
    }

    // ---------------------------------------------------------------------
    // Rating and watched list
    // ---------------------------------------------------------------------

    /// Rating already stored for the open movie, if it was watched before
    pub fn existing_rating(&self) -> Option<u8> {
        let id = self.selection.selected_id()?;
        self.watched.get(id).map(|entry| entry.user_rating)
    }

    /// Record a choice from the rating input for the open movie
    pub fn choose_rating(&mut self, rating: u8) -> Result<(), ControllerError> {
        if !self.selection.is_viewing() {
            return Err(ControllerError::NothingSelected);
        }
        if rating == 0 || rating > self.max_rating {
            return Err(ControllerError::InvalidRating {
                rating,
                max: self.max_rating,
            });
        }
        self.detail.rating.choose(rating);
        Ok(())
    }

    /// Build a watched entry from the open movie and its chosen rating, add it, and close the pane
    pub fn add_selected_to_watched(&mut self) -> Result<WatchedEntry, ControllerError> {
        let id = self
            .selection
            .selected_id()
            .ok_or(ControllerError::NothingSelected)?
            .to_string();
        if self.watched.contains(&id) {
            return Err(ControllerError::AlreadyWatched(id));
        }
        let movie = self.detail.movie.as_ref().ok_or(ControllerError::DetailNotLoaded)?;
        let user_rating = self.detail.rating.rating().ok_or(ControllerError::NoRating)?;

        let entry = WatchedEntry {
            id,
            title: movie.title.clone(),
            year: movie.year.clone(),
            poster_url: movie.poster_url.clone(),
            imdb_rating: movie.imdb_rating,
            runtime_minutes: movie.runtime_minutes,
            user_rating,
            rating_revision_count: self.detail.rating.revisions(),
            watched_at: Some(Utc::now()),
        };

        self.add_watched(entry.clone())?;
        Ok(entry)
    }

    /// Append to the watched list, persist, and close the detail pane
    pub fn add_watched(&mut self, entry: WatchedEntry) -> Result<(), ControllerError> {
        if entry.user_rating == 0 || entry.user_rating > self.max_rating {
            return Err(ControllerError::InvalidRating {
                rating: entry.user_rating,
                max: self.max_rating,
            });
        }
        self.watched.add(entry)?;
        self.close();
        Ok(())
    }

    pub fn remove_watched(&mut self, id: &str) -> Result<usize, ControllerError> {
        self.watched.remove(id)
    }

    pub fn clear_watched(&mut self) -> Result<usize, ControllerError> {
        let removed = self.watched.clear()?;
        info!("Cleared watched list ({} movies)", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::watched::WATCHED_KEY;
    use async_trait::async_trait;
    use popcorn_sources::omdb::api::{parse_detail_response, parse_search_response};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Catalog answering from canned OMDb bodies; unknown queries fail like a dead network
    #[derive(Default)]
    struct FakeCatalog {
        search_bodies: HashMap<String, String>,
        detail_bodies: HashMap<String, String>,
        requests: AtomicUsize,
    }

    impl FakeCatalog {
        fn with_search(mut self, query: &str, body: &str) -> Self {
            self.search_bodies.insert(query.to_string(), body.to_string());
            self
        }

        fn with_detail(mut self, id: &str, body: &str) -> Self {
            self.detail_bodies.insert(id.to_string(), body.to_string());
            self
        }

        fn requests(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MovieCatalog for FakeCatalog {
        fn catalog_name(&self) -> &str {
            "fake"
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            match self.search_bodies.get(query) {
                Some(body) => parse_search_response(body),
                None => Err(CatalogError::Network("HTTP 500".to_string())),
            }
        }

        async fn movie_details(&self, id: &str) -> Result<MovieDetail, CatalogError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            match self.detail_bodies.get(id) {
                Some(body) => parse_detail_response(body, id),
                None => Err(CatalogError::Network("HTTP 500".to_string())),
            }
        }
    }

    const BATMAN_SEARCH: &str = r#"{"Search":[
        {"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Poster":"https://img/batman-begins.jpg"},
        {"Title":"Batman: The Killing Joke","Year":"2016","imdbID":"tt4853102","Poster":"N/A"}
    ],"Response":"True"}"#;

    const DARK_KNIGHT: &str = r#"{"Title":"The Dark Knight","Year":"2008","Released":"18 Jul 2008",
        "Runtime":"152 min","Genre":"Action, Crime, Drama","Director":"Christopher Nolan",
        "Actors":"Christian Bale, Heath Ledger","Plot":"Why so serious?",
        "Poster":"https://img/dark-knight.jpg","imdbRating":"9.0","imdbID":"tt0468569","Response":"True"}"#;

    const INCEPTION: &str = r#"{"Title":"Inception","Year":"2010","Runtime":"148 min",
        "Poster":"https://img/inception.jpg","imdbRating":"8.8","imdbID":"tt1375666","Response":"True"}"#;

    fn controller(catalog: FakeCatalog) -> AppController<FakeCatalog, MemoryStore> {
        AppController::new(catalog, MemoryStore::new(), &Config::default())
    }

    fn stored_entries(controller: &AppController<FakeCatalog, MemoryStore>) -> Vec<WatchedEntry> {
        let raw = controller.watched().store().get(WATCHED_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_short_query_issues_no_request() {
        let mut app = controller(FakeCatalog::default().with_search("batman", BATMAN_SEARCH));
        assert!(app.search("batman").await);
        let before = app.search_state().results.clone();

        assert!(!app.search("ba").await);
        assert!(!app.search("   x  ").await);
        assert_eq!(app.catalog().requests(), 1);
        assert_eq!(app.search_state().results, before);
        assert!(!app.search_state().is_loading);
        assert_eq!(app.search_state().error, None);
    }

    #[tokio::test]
    async fn test_batman_search_drops_missing_poster() {
        let mut app = controller(FakeCatalog::default().with_search("batman", BATMAN_SEARCH));
        assert!(app.search("  batman ").await);
        let state = app.search_state();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].id, "tt0372784");
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_search_without_posters_is_empty_without_error() {
        let body = r#"{"Search":[{"Title":"X","Year":"1999","imdbID":"tt1","Poster":"N/A"}],"Response":"True"}"#;
        let mut app = controller(FakeCatalog::default().with_search("xyz", body));
        app.search("xyz").await;
        assert!(app.search_state().results.is_empty());
        assert_eq!(app.search_state().error, None);
    }

    #[tokio::test]
    async fn test_search_failures_record_message_and_clear_results() {
        let not_found = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let mut app = controller(
            FakeCatalog::default()
                .with_search("batman", BATMAN_SEARCH)
                .with_search("qwertyuiop", not_found),
        );
        app.search("batman").await;
        assert_eq!(app.search_state().results.len(), 1);

        app.search("qwertyuiop").await;
        assert!(app.search_state().results.is_empty());
        assert_eq!(app.search_state().error.as_deref(), Some("Movie not found!"));

        app.search("offline").await;
        assert_eq!(
            app.search_state().error.as_deref(),
            Some("Something went wrong with fetching movies")
        );

        // A new search clears the previous error
        app.search("batman").await;
        assert_eq!(app.search_state().error, None);
    }

    #[test]
    fn test_stale_search_does_not_overwrite_newer_results() {
        let mut app = controller(FakeCatalog::default());
        let slow = app.begin_search("batman").unwrap();
        let fast = app.begin_search("superman").unwrap();
        assert!(app.search_state().is_loading);

        let superman = SearchResult {
            id: "tt0078346".to_string(),
            title: "Superman".to_string(),
            year: "1978".to_string(),
            poster_url: "https://img/superman.jpg".to_string(),
        };
        assert!(app.complete_search(fast, Ok(vec![superman.clone()])));
        assert!(!app.complete_search(slow, Err(CatalogError::Network("timeout".to_string()))));

        assert_eq!(app.search_state().results, vec![superman]);
        assert_eq!(app.search_state().error, None);
        assert!(!app.search_state().is_loading);
    }

    #[tokio::test]
    async fn test_select_toggles_and_refetches() {
        let mut app = controller(FakeCatalog::default().with_detail("tt0468569", DARK_KNIGHT));
        assert_eq!(app.window_title(), "usePopcorn");

        app.select_and_load("tt0468569").await;
        assert_eq!(app.selection().selected_id(), Some("tt0468569"));
        assert_eq!(app.detail_state().movie.as_ref().unwrap().title, "The Dark Knight");
        assert_eq!(app.window_title(), "Movie | The Dark Knight");

        app.select_and_load("tt0468569").await;
        assert_eq!(app.selection(), &Selection::Idle);
        assert!(app.detail_state().movie.is_none());
        assert_eq!(app.window_title(), "usePopcorn");

        app.select_and_load("tt0468569").await;
        assert!(app.detail_state().movie.is_some());
        assert_eq!(app.catalog().requests(), 2);
    }

    #[tokio::test]
    async fn test_escape_closes_detail() {
        let mut app = controller(FakeCatalog::default().with_detail("tt0468569", DARK_KNIGHT));
        app.select_and_load("tt0468569").await;
        app.handle_signal(UiSignal::Escape);
        assert_eq!(app.selection(), &Selection::Idle);
        assert_eq!(app.window_title(), "usePopcorn");
    }

    #[tokio::test]
    async fn test_select_and_close_clear_search_error() {
        let mut app = controller(FakeCatalog::default().with_detail("tt0468569", DARK_KNIGHT));
        app.search("offline").await;
        assert!(app.search_state().error.is_some());

        app.select_and_load("tt0468569").await;
        assert_eq!(app.search_state().error, None);

        app.search("offline").await;
        assert!(app.search_state().error.is_some());
        app.handle_signal(UiSignal::Escape);
        assert_eq!(app.search_state().error, None);
        assert!(!app.search_state().is_loading);
    }

    #[tokio::test]
    async fn test_detail_error_is_separate_from_search_error() {
        let mut app = controller(FakeCatalog::default().with_search("batman", BATMAN_SEARCH));
        app.search("batman").await;
        app.select_and_load("tt0372784").await;

        assert_eq!(
            app.detail_state().error.as_deref(),
            Some("Something went wrong with fetching movies")
        );
        assert_eq!(app.search_state().error, None);
        assert_eq!(app.search_state().results.len(), 1);
        assert_eq!(app.window_title(), "usePopcorn");
    }

    #[test]
    fn test_stale_detail_is_dropped() {
        let mut app = controller(FakeCatalog::default());
        let first = app.select("tt0468569").unwrap();
        let second = app.select("tt1375666").unwrap();

        let inception = parse_detail_response(INCEPTION, "tt1375666").unwrap();
        let dark_knight = parse_detail_response(DARK_KNIGHT, "tt0468569").unwrap();
        assert!(app.complete_detail(second, Ok(inception)));
        assert!(!app.complete_detail(first, Ok(dark_knight)));
        assert_eq!(app.detail_state().movie.as_ref().unwrap().id, "tt1375666");
    }

    #[test]
    fn test_detail_after_close_is_dropped() {
        let mut app = controller(FakeCatalog::default());
        let ticket = app.select("tt0468569").unwrap();
        app.close();
        let dark_knight = parse_detail_response(DARK_KNIGHT, "tt0468569").unwrap();
        assert!(!app.complete_detail(ticket, Ok(dark_knight)));
        assert!(app.detail_state().movie.is_none());
    }

    #[tokio::test]
    async fn test_add_then_remove_updates_store() {
        let mut app = controller(FakeCatalog::default().with_detail("tt0468569", DARK_KNIGHT));
        app.select_and_load("tt0468569").await;

        assert!(matches!(app.add_selected_to_watched(), Err(ControllerError::NoRating)));

        app.choose_rating(7).unwrap();
        app.choose_rating(9).unwrap();
        let entry = app.add_selected_to_watched().unwrap();
        assert_eq!(entry.user_rating, 9);
        assert_eq!(entry.rating_revision_count, 2);
        assert_eq!(entry.runtime_minutes, 152);
        assert_eq!(entry.imdb_rating, 9.0);

        // Adding closes the detail pane
        assert_eq!(app.selection(), &Selection::Idle);
        assert_eq!(app.watched().len(), 1);
        let stored = stored_entries(&app);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "tt0468569");
        assert_eq!(stored[0].user_rating, 9);

        assert_eq!(app.remove_watched("tt0468569").unwrap(), 1);
        assert!(app.watched().is_empty());
        assert!(stored_entries(&app).is_empty());
    }

    #[tokio::test]
    async fn test_already_watched_shows_existing_rating() {
        let mut app = controller(FakeCatalog::default().with_detail("tt0468569", DARK_KNIGHT));
        app.select_and_load("tt0468569").await;
        assert_eq!(app.existing_rating(), None);
        app.choose_rating(8).unwrap();
        app.add_selected_to_watched().unwrap();

        app.select_and_load("tt0468569").await;
        assert_eq!(app.existing_rating(), Some(8));
        app.choose_rating(3).unwrap();
        assert!(matches!(
            app.add_selected_to_watched(),
            Err(ControllerError::AlreadyWatched(_))
        ));
        assert_eq!(app.watched().len(), 1);
    }

    #[test]
    fn test_rating_bounds() {
        let mut app = controller(FakeCatalog::default());
        assert!(matches!(app.choose_rating(5), Err(ControllerError::NothingSelected)));

        app.select("tt0468569");
        assert!(matches!(
            app.choose_rating(0),
            Err(ControllerError::InvalidRating { rating: 0, max: 10 })
        ));
        assert!(app.choose_rating(11).is_err());
        assert!(app.choose_rating(10).is_ok());
        assert!(matches!(app.add_selected_to_watched(), Err(ControllerError::DetailNotLoaded)));
    }

    #[test]
    fn test_summary_of_empty_list_is_zero() {
        let app = controller(FakeCatalog::default());
        let summary = app.summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_imdb_rating, 0.0);
        assert_eq!(summary.avg_user_rating, 0.0);
        assert_eq!(summary.avg_runtime, 0.0);
    }
}
