pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, RatingConfig, UiConfig, API_KEY_ENV};
pub use paths::{home_override, PathManager};
