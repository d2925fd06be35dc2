use super::open_watched;
use super::prompts::prompt_yes_no;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::PathManager;
use std::fs;

pub fn run_clear(all: bool, watched: bool, logs: bool, yes: bool, paths: &PathManager, output: &Output) -> Result<()> {
    if !(all || watched || logs) {
        output.warn("No clear option specified. Use --watched, --logs, or --all");
        output.info("\nExample: popcorn clear --watched");
        return Ok(());
    }

    if all || watched {
        clear_watched(yes, paths, output)?;
    }

    if all || logs {
        clear_logs(paths, output)?;
    }

    Ok(())
}

fn clear_watched(yes: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let mut watched = open_watched(paths)?;
    if watched.is_empty() {
        output.info("Watched list is already empty");
        return Ok(());
    }

    if !yes && !prompt_yes_no(&format!("Delete all {} movies from your watched list?", watched.len()), Some(false))? {
        output.info("Kept the watched list");
        return Ok(());
    }

    let removed = watched.clear()?;
    output.success(format!("Cleared {} movies from your watched list", removed));
    Ok(())
}

fn clear_logs(paths: &PathManager, output: &Output) -> Result<()> {
    let log_dir = paths.log_dir();
    if log_dir.exists() {
        fs::remove_dir_all(log_dir)
            .map_err(|e| eyre!("Failed to remove logs at {}: {}", log_dir.display(), e))?;
        output.success(format!("Cleared logs: {}", log_dir.display()));
    } else {
        output.info("No logs found to clear");
    }
    Ok(())
}
