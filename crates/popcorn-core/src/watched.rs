use crate::error::ControllerError;
use crate::store::KeyValueStore;
use popcorn_models::{WatchedEntry, WatchedSummary};
use tracing::{debug, info, warn};

/// Store key holding the watched list as a JSON array
pub const WATCHED_KEY: &str = "watched";

/// Where an unparsable watched list is preserved before starting empty
const CORRUPT_KEY: &str = "watched.corrupt";

/// The persisted watched list. Every mutation rewrites the whole list under [`WATCHED_KEY`].
pub struct WatchedList<S: KeyValueStore> {
    entries: Vec<WatchedEntry>,
    store: S,
}

impl<S: KeyValueStore> WatchedList<S> {
    /// Load the list once at startup.
    ///
    /// A missing key is an empty list. A value that does not parse is copied to
    /// `watched.corrupt` and the list starts empty.
    pub fn load(mut store: S) -> Self {
        let raw = match store.get(WATCHED_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read watched list, starting empty: {}", e);
                None
            }
        };

        let entries = match raw {
            None => {
                debug!("No stored watched list");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<WatchedEntry>>(&raw) {
                Ok(entries) => {
                    info!("Loaded watched list ({} movies)", entries.len());
                    entries
                }
                Err(e) => {
                    if let Err(backup_err) = store.set(CORRUPT_KEY, &raw) {
                        warn!(
                            "Watched list is unreadable ({}) and could not be backed up: {}. Starting with an empty list.",
                            e, backup_err
                        );
                    } else {
                        warn!(
                            "Watched list is unreadable ({}). Kept a copy under '{}' and starting with an empty list.",
                            e, CORRUPT_KEY
                        );
                    }
                    Vec::new()
                }
            },
        };

        Self { entries, store }
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_entries(&self.entries)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append an entry and persist. Ids already in the list are rejected.
    pub fn add(&mut self, entry: WatchedEntry) -> Result<(), ControllerError> {
        if self.contains(&entry.id) {
            return Err(ControllerError::AlreadyWatched(entry.id));
        }
        info!("Adding {} ({}) to watched list, rated {}", entry.title, entry.id, entry.user_rating);
        self.entries.push(entry);
        self.persist()
    }

    /// Remove every entry with `id` and persist. Returns how many were removed.
    pub fn remove(&mut self, id: &str) -> Result<usize, ControllerError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = before - self.entries.len();
        if removed > 0 {
            info!("Removed {} from watched list", id);
        } else {
            debug!("Remove requested for {}, which is not in the watched list", id);
        }
        self.persist()?;
        Ok(removed)
    }

    /// Drop every entry and delete the stored key; a missing key loads as an empty list
    pub fn clear(&mut self) -> Result<usize, ControllerError> {
        let removed = self.entries.len();
        self.entries.clear();
        self.store.remove(WATCHED_KEY)?;
        debug!("Removed stored watched list");
        Ok(removed)
    }

    fn persist(&mut self) -> Result<(), ControllerError> {
        let json = serde_json::to_string(&self.entries).map_err(anyhow::Error::from)?;
        self.store.set(WATCHED_KEY, &json)?;
        debug!("Persisted watched list ({} movies)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};

    fn entry(id: &str, user_rating: u8) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: format!("Movie {}", id),
            year: "2008".to_string(),
            poster_url: "poster.jpg".to_string(),
            imdb_rating: 9.0,
            runtime_minutes: 152,
            user_rating,
            rating_revision_count: 1,
            watched_at: None,
        }
    }

    fn stored(list: &WatchedList<MemoryStore>) -> Vec<WatchedEntry> {
        let raw = list.store().get(WATCHED_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_add_then_remove_persists_each_change() {
        let mut list = WatchedList::load(MemoryStore::new());
        assert!(list.is_empty());

        list.add(entry("tt0468569", 9)).unwrap();
        assert_eq!(list.len(), 1);
        let persisted = stored(&list);
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, "tt0468569");
        assert_eq!(persisted[0].user_rating, 9);

        assert_eq!(list.remove("tt0468569").unwrap(), 1);
        assert!(list.is_empty());
        assert!(stored(&list).is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut list = WatchedList::load(MemoryStore::new());
        list.add(entry("tt1", 7)).unwrap();
        let err = list.add(entry("tt1", 3)).unwrap_err();
        assert!(matches!(err, ControllerError::AlreadyWatched(ref id) if id == "tt1"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("tt1").unwrap().user_rating, 7);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut list = WatchedList::load(MemoryStore::new());
        list.add(entry("tt1", 7)).unwrap();
        assert_eq!(list.remove("tt404").unwrap(), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_reload_from_file_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut list = WatchedList::load(FileStore::new(dir.path()).unwrap());
            list.add(entry("tt1", 7)).unwrap();
            list.add(entry("tt2", 8)).unwrap();
        }
        let list = WatchedList::load(FileStore::new(dir.path()).unwrap());
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].id, "tt1");
        assert_eq!(list.entries()[1].id, "tt2");
    }

    #[test]
    fn test_corrupt_value_fails_closed() {
        let mut store = MemoryStore::new();
        store.set(WATCHED_KEY, "{not json").unwrap();

        let mut list = WatchedList::load(store);
        assert!(list.is_empty());
        assert_eq!(list.store().get(CORRUPT_KEY).unwrap().as_deref(), Some("{not json"));

        // The list stays usable and the next write replaces the bad value
        list.add(entry("tt1", 5)).unwrap();
        assert_eq!(stored(&list).len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut list = WatchedList::load(MemoryStore::new());
        list.add(entry("tt1", 5)).unwrap();
        list.add(entry("tt2", 6)).unwrap();
        assert_eq!(list.clear().unwrap(), 2);
        assert!(list.is_empty());
        assert_eq!(list.store().get(WATCHED_KEY).unwrap(), None);
    }

    #[test]
    fn test_older_list_format_loads() {
        let mut store = MemoryStore::new();
        store
            .set(
                WATCHED_KEY,
                r#"[{"imdbId":"tt0468569","title":"The Dark Knight","year":"2008","poster":"p.jpg",
                    "imdbRating":9,"runtime":"152","userRating":9,"countRaTingDecisions":2}]"#,
            )
            .unwrap();

        let list = WatchedList::load(store);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].runtime_minutes, 152);
        assert_eq!(list.entries()[0].rating_revision_count, 2);
        assert_eq!(list.store().get(CORRUPT_KEY).unwrap(), None);
    }
}
