pub mod browse;
pub mod clear;
pub mod config;
pub mod lookup;
pub mod prompts;
pub mod watched;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::{AppController, FileStore, WatchedList};
use popcorn_sources::OmdbClient;

pub type Controller = AppController<OmdbClient, FileStore>;

/// Load config.toml (or defaults) with environment overrides and basic validation
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| eyre!("Failed to load {}: {}", paths.config_file().display(), e))?;
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    Ok(config)
}

pub fn open_store(paths: &PathManager) -> Result<FileStore> {
    FileStore::new(paths.store_dir())
        .map_err(|e| eyre!("Failed to open data store at {}: {}", paths.store_dir().display(), e))
}

/// Watched list alone, for commands that never talk to the catalog
pub fn open_watched(paths: &PathManager) -> Result<WatchedList<FileStore>> {
    Ok(WatchedList::load(open_store(paths)?))
}

/// Controller wired to the configured catalog and the on-disk store
pub fn open_controller(paths: &PathManager) -> Result<Controller> {
    let config = load_config(paths)?;
    config.validate_for_catalog().map_err(|e| eyre!("{}", e))?;
    let catalog = OmdbClient::new(&config.catalog).map_err(|e| eyre!("{}: {}", e, e.detail()))?;
    Ok(AppController::new(catalog, open_store(paths)?, &config))
}
