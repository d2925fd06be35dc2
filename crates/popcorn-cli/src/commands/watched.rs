use super::open_watched;
use crate::output::Output;
use crate::view;
use color_eyre::Result;
use popcorn_config::PathManager;
use serde_json::json;

/// Print the summary and the watched list
pub fn run_watched(paths: &PathManager, output: &Output) -> Result<()> {
    let watched = open_watched(paths)?;
    let summary = watched.summary();

    output.block(view::watched_pane(&summary, watched.entries()));
    output.json(&json!({
        "summary": summary,
        "entries": watched.entries(),
    }));
    Ok(())
}

pub fn run_remove(id: &str, paths: &PathManager, output: &Output) -> Result<()> {
    let mut watched = open_watched(paths)?;
    let title = watched.get(id).map(|entry| entry.title.clone());

    let removed = watched.remove(id)?;
    match (removed, title) {
        (0, _) => output.warn(format!("{} is not in your watched list", id)),
        (_, Some(title)) => output.success(format!("Removed {} from your watched list", title)),
        (_, None) => output.success(format!("Removed {} from your watched list", id)),
    }
    Ok(())
}
