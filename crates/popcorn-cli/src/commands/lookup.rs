use super::open_controller;
use crate::output::Output;
use crate::view::{self, Loader};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::PathManager;
use serde_json::json;

/// One-shot search: prints the result counter and table
pub async fn run_search(query: &str, paths: &PathManager, output: &Output) -> Result<()> {
    let mut app = open_controller(paths)?;

    let loader = Loader::start(output.is_human() && !output.is_quiet());
    let ran = app.search(query).await;
    loader.finish();

    if !ran {
        output.warn(view::query_too_short(query));
        return Ok(());
    }

    let state = app.search_state();
    if let Some(error) = &state.error {
        return Err(eyre!("{}", error));
    }

    output.block(view::num_results(state.results.len()));
    if !state.results.is_empty() {
        output.block(view::results_table(&state.results));
    }
    output.json(&json!({
        "query": query.trim(),
        "count": state.results.len(),
        "results": state.results,
    }));
    Ok(())
}

/// One-shot detail pane for a catalog id
pub async fn run_show(id: &str, paths: &PathManager, output: &Output) -> Result<()> {
    let mut app = open_controller(paths)?;

    let loader = Loader::start(output.is_human() && !output.is_quiet());
    app.select_and_load(id).await;
    loader.finish();

    let detail = app.detail_state();
    if let Some(error) = &detail.error {
        return Err(eyre!("{}", error));
    }

    output.block(view::detail_pane(detail, app.existing_rating(), app.max_rating()));
    output.json(&json!({
        "movie": detail.movie,
        "your_rating": app.existing_rating(),
    }));
    Ok(())
}

/// Fetch a movie, rate it and add it to the watched list
pub async fn run_add(id: &str, rating: u8, paths: &PathManager, output: &Output) -> Result<()> {
    let mut app = open_controller(paths)?;

    let loader = Loader::start(output.is_human() && !output.is_quiet());
    app.select_and_load(id).await;
    loader.finish();

    if let Some(error) = &app.detail_state().error {
        return Err(eyre!("{}", error));
    }

    app.choose_rating(rating)?;
    let entry = app.add_selected_to_watched()?;

    output.success(format!(
        "Added {} ({}) to your watched list, rated {}/{}",
        entry.title,
        entry.year,
        entry.user_rating,
        app.max_rating()
    ));
    output.json(&json!({ "added": entry }));
    Ok(())
}
