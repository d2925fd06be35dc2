use super::prompts::{prompt_password, prompt_string};
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager, API_KEY_ENV};
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, paths, output),
        ConfigCommands::Catalog {
            api_key,
            base_url,
            timeout_secs,
        } => configure_catalog(api_key, base_url, timeout_secs, paths, output),
        ConfigCommands::Rating { max } => update_config(paths, output, |config| {
            config.rating.max_rating = max;
            format!("Rating scale set to 1-{}", max)
        }),
        ConfigCommands::Ui { title, min_query_len } => update_config(paths, output, |config| {
            if let Some(title) = title {
                config.ui.app_title = title;
            }
            if let Some(min_query_len) = min_query_len {
                config.ui.min_query_len = min_query_len;
            }
            format!(
                "UI settings saved (title '{}', minimum query length {})",
                config.ui.app_title, config.ui.min_query_len
            )
        }),
    }
}

/// Config as stored on disk, without environment overrides, so saving never persists them
fn load_file_config(paths: &PathManager) -> Result<Config> {
    let path = paths.config_file();
    if !path.exists() {
        return Ok(Config::default());
    }
    Config::load_from_file(&path).map_err(|e| eyre!("Failed to load {}: {}", path.display(), e))
}

fn save_config(config: &Config, paths: &PathManager) -> Result<()> {
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    config
        .save_to_file(&paths.config_file())
        .map_err(|e| eyre!("Failed to save {}: {}", paths.config_file().display(), e))
}

fn update_config(paths: &PathManager, output: &Output, apply: impl FnOnce(&mut Config) -> String) -> Result<()> {
    let mut config = load_file_config(paths)?;
    let message = apply(&mut config);
    save_config(&config, paths)?;
    output.success(message);
    Ok(())
}

fn mask(secret: &str) -> String {
    match secret.chars().count() {
        0 => "(not set)".to_string(),
        1..=4 => "****".to_string(),
        len => {
            let visible: String = secret.chars().skip(len - 2).collect();
            format!("****{}", visible)
        }
    }
}

fn show_config(full: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let mut config = load_file_config(paths)?;
    config.apply_env_overrides();

    let api_key = if full {
        config.catalog.api_key.clone()
    } else {
        mask(&config.catalog.api_key)
    };

    output.block(format!("Config file: {}", paths.config_file().display()));
    output.block(format!("Data:        {}", paths.data_dir().display()));
    output.block(format!("Data store:  {}", paths.store_dir().display()));
    output.block(format!("Logs:        {}", paths.log_dir().display()));
    output.block("");
    output.block("[catalog]");
    output.block(format!("  api_key      = {}", api_key));
    output.block(format!("  base_url     = {}", config.catalog.base_url));
    output.block(format!("  timeout_secs = {}", config.catalog.timeout_secs));
    output.block("[rating]");
    output.block(format!("  max_rating   = {}", config.rating.max_rating));
    output.block("[ui]");
    output.block(format!("  app_title     = {}", config.ui.app_title));
    output.block(format!("  min_query_len = {}", config.ui.min_query_len));

    if std::env::var(API_KEY_ENV).is_ok() {
        output.block(format!("\n(api_key taken from {})", API_KEY_ENV));
    }

    output.json(&json!({
        "config_file": paths.config_file().display().to_string(),
        "data_dir": paths.data_dir().display().to_string(),
        "store_dir": paths.store_dir().display().to_string(),
        "log_dir": paths.log_dir().display().to_string(),
        "catalog": {
            "api_key": api_key,
            "base_url": config.catalog.base_url,
            "timeout_secs": config.catalog.timeout_secs,
        },
        "rating": { "max_rating": config.rating.max_rating },
        "ui": {
            "app_title": config.ui.app_title,
            "min_query_len": config.ui.min_query_len,
        },
    }));
    Ok(())
}

fn configure_catalog(
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    paths: &PathManager,
    output: &Output,
) -> Result<()> {
    let mut config = load_file_config(paths)?;
    let interactive = api_key.is_none() && base_url.is_none() && timeout_secs.is_none();

    if interactive {
        output.info("Get a free key at https://www.omdbapi.com/apikey.aspx");
        let key = prompt_password("OMDb API key")?;
        if !key.trim().is_empty() {
            config.catalog.api_key = key.trim().to_string();
        }
        let url = prompt_string("Catalog URL", Some(&config.catalog.base_url))?;
        if !url.trim().is_empty() {
            config.catalog.base_url = url.trim().to_string();
        }
    } else {
        if let Some(key) = api_key {
            config.catalog.api_key = key.trim().to_string();
        }
        if let Some(url) = base_url {
            config.catalog.base_url = url.trim().to_string();
        }
        if let Some(timeout) = timeout_secs {
            config.catalog.timeout_secs = timeout;
        }
    }

    save_config(&config, paths)?;
    if config.is_catalog_configured() {
        output.success(format!("Catalog settings saved to {}", paths.config_file().display()));
    } else {
        output.warn(format!(
            "Catalog settings saved, but no API key is set. Set one here or via {}",
            API_KEY_ENV
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(""), "(not set)");
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask("5ace90c9"), "****c9");
    }
}
