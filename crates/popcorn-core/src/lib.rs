pub mod controller;
pub mod error;
pub mod selection;
pub mod store;
pub mod watched;

pub use controller::{AppController, DetailState, DetailTicket, SearchState, SearchTicket, UiSignal};
pub use error::ControllerError;
pub use selection::Selection;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use watched::{WatchedList, WATCHED_KEY};
