use super::prompts::{prompt_choice, prompt_string};
use super::{open_controller, Controller};
use crate::output::Output;
use crate::view::{self, Loader};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use console::Term;
use owo_colors::OwoColorize;
use popcorn_config::PathManager;
use popcorn_core::UiSignal;
use tracing::info;

/// Which panes of the main screen are expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Panes {
    results_open: bool,
    watched_open: bool,
}

impl Default for Panes {
    fn default() -> Self {
        Self {
            results_open: true,
            watched_open: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainAction {
    Search,
    Open,
    Delete,
    ToggleResults,
    ToggleWatched,
    Quit,
}

impl MainAction {
    fn label(&self, panes: &Panes) -> String {
        match self {
            MainAction::Search => "🔍 Search movies".to_string(),
            MainAction::Open => "🎬 Open a result".to_string(),
            MainAction::Delete => "✖️  Delete from watched list".to_string(),
            MainAction::ToggleResults => toggle_label("results", panes.results_open),
            MainAction::ToggleWatched => toggle_label("watched list", panes.watched_open),
            MainAction::Quit => "Quit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailAction {
    Rate,
    Add,
    Search,
    Back,
}

impl DetailAction {
    fn label(&self) -> &'static str {
        match self {
            DetailAction::Rate => "🌟 Rate",
            DetailAction::Add => "+ Add to watched list",
            DetailAction::Search => "🔍 New search",
            DetailAction::Back => "⬅️  Back",
        }
    }
}

fn toggle_label(pane: &str, open: bool) -> String {
    if open {
        format!("– Collapse {}", pane)
    } else {
        format!("+ Expand {}", pane)
    }
}

/// Terminal window title via the xterm OSC 0 sequence
fn set_title(term: &Term, title: &str) -> std::io::Result<()> {
    if term.is_term() {
        term.write_str(&format!("\x1b]0;{}\x07", title))?;
    }
    Ok(())
}

fn main_actions(app: &Controller) -> Vec<MainAction> {
    let mut actions = vec![MainAction::Search];
    if !app.search_state().results.is_empty() {
        actions.push(MainAction::Open);
    }
    if !app.watched().is_empty() {
        actions.push(MainAction::Delete);
    }
    actions.extend([MainAction::ToggleResults, MainAction::ToggleWatched, MainAction::Quit]);
    actions
}

fn detail_actions(app: &Controller) -> Vec<DetailAction> {
    let mut actions = Vec::new();
    let loaded = app.detail_state().movie.is_some();
    if loaded && app.existing_rating().is_none() {
        actions.push(DetailAction::Rate);
        // The add button only appears once a rating was chosen
        if app.detail_state().rating.rating().is_some() {
            actions.push(DetailAction::Add);
        }
    }
    actions.extend([DetailAction::Search, DetailAction::Back]);
    actions
}

/// Interactive session: search, inspect, rate, and manage the watched list
pub async fn run_browse(paths: &PathManager, output: &Output) -> Result<()> {
    if !output.is_human() {
        return Err(eyre!("The interactive browser only supports --output human"));
    }

    let mut app = open_controller(paths)?;
    let term = Term::stdout();
    let mut panes = Panes::default();
    let mut notice: Option<String> = None;

    info!("Interactive session started ({} movies watched)", app.watched().len());

    loop {
        set_title(&term, &app.window_title())?;
        term.clear_screen()?;
        output.block(view::nav_bar(app.search_state().results.len()));
        output.block("");
        if let Some(message) = notice.take() {
            output.block(format!("{}\n", message));
        }

        let keep_going = if app.selection().is_viewing() {
            detail_screen(&mut app, output, &mut notice).await?;
            true
        } else {
            main_screen(&mut app, &mut panes, output, &mut notice).await?
        };

        if !keep_going {
            break;
        }
    }

    app.close();
    set_title(&term, &app.window_title())?;
    info!("Interactive session ended");
    Ok(())
}

/// Results and watched panes. Returns false when the user quits.
async fn main_screen(
    app: &mut Controller,
    panes: &mut Panes,
    output: &Output,
    notice: &mut Option<String>,
) -> Result<bool> {
    output.block(view::pane_heading("Results", panes.results_open));
    if panes.results_open {
        output.block(view::results_pane(app.search_state()));
    }
    output.block("");
    output.block(view::pane_heading("Watched", panes.watched_open));
    if panes.watched_open {
        output.block(view::watched_pane(&app.summary(), app.watched().entries()));
    }
    output.block("");

    let actions = main_actions(app);
    let labels: Vec<String> = actions.iter().map(|action| action.label(panes)).collect();
    let Some(choice) = prompt_choice("What next?", &labels, 0)? else {
        // Esc has nothing to close on the main screen
        return Ok(true);
    };

    match actions[choice] {
        MainAction::Search => search(app, notice).await?,
        MainAction::Open => {
            let labels: Vec<String> = app
                .search_state()
                .results
                .iter()
                .map(|movie| format!("{} ({})", movie.title, movie.year))
                .collect();
            if let Some(index) = prompt_choice("Open which movie?", &labels, 0)? {
                let id = app.search_state().results[index].id.clone();
                let loader = Loader::start(true);
                app.select_and_load(&id).await;
                loader.finish();
            }
        }
        MainAction::Delete => {
            let labels: Vec<String> = app
                .watched()
                .entries()
                .iter()
                .map(|entry| format!("{} ({}) 🌟 {}", entry.title, entry.year, entry.user_rating))
                .collect();
            if let Some(index) = prompt_choice("Delete which movie?", &labels, 0)? {
                let entry = app.watched().entries()[index].clone();
                app.remove_watched(&entry.id)?;
                *notice = Some(format!("{} Removed {}", "✓".green(), entry.title));
            }
        }
        MainAction::ToggleResults => panes.results_open = !panes.results_open,
        MainAction::ToggleWatched => panes.watched_open = !panes.watched_open,
        MainAction::Quit => return Ok(false),
    }

    Ok(true)
}

async fn detail_screen(app: &mut Controller, output: &Output, notice: &mut Option<String>) -> Result<()> {
    let max_rating = app.max_rating();
    output.block(view::detail_pane(app.detail_state(), app.existing_rating(), max_rating));
    output.block("");

    let actions = detail_actions(app);
    let labels: Vec<&str> = actions.iter().map(DetailAction::label).collect();
    let Some(choice) = prompt_choice("Esc to close", &labels, 0)? else {
        app.handle_signal(UiSignal::Escape);
        return Ok(());
    };

    match actions[choice] {
        DetailAction::Rate => {
            let choices = view::rating_choices(max_rating);
            let current = app.detail_state().rating.rating().map(|r| usize::from(r) - 1).unwrap_or(0);
            if let Some(index) = prompt_choice("Your rating", &choices, current)? {
                // index < max_rating, which is a u8
                app.choose_rating(index as u8 + 1)?;
            }
        }
        DetailAction::Add => match app.add_selected_to_watched() {
            Ok(entry) => {
                *notice = Some(format!(
                    "{} Added {} to your watched list (🌟 {})",
                    "✓".green(),
                    entry.title,
                    entry.user_rating
                ));
            }
            Err(e) => *notice = Some(format!("{} {}", "✗".red(), e)),
        },
        DetailAction::Search => {
            // Typing a new search closes the open movie
            app.close();
            search(app, notice).await?;
        }
        DetailAction::Back => app.close(),
    }

    Ok(())
}

/// Prompt for a query and run it. A query below the minimum length leaves state untouched.
async fn search(app: &mut Controller, notice: &mut Option<String>) -> Result<()> {
    let query = prompt_string("Search movies...", None)?;
    let loader = Loader::start(true);
    let ran = app.search(&query).await;
    loader.finish();
    if !ran {
        *notice = Some(format!("{} {}", "⚠".yellow(), view::query_too_short(&query)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_labels() {
        let mut panes = Panes::default();
        assert_eq!(MainAction::ToggleResults.label(&panes), "– Collapse results");
        panes.results_open = false;
        assert_eq!(MainAction::ToggleResults.label(&panes), "+ Expand results");
        assert_eq!(MainAction::ToggleWatched.label(&panes), "– Collapse watched list");
    }
}
