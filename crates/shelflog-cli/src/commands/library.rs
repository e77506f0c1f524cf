use anyhow::Result;
use comfy_table::Table;
use serde_json::json;
use shelflog_core::{LibraryEntry, LibraryView};
use shelflog_models::ContentType;
use std::path::PathBuf;

use super::{load_components, open_store};
use crate::output::{Output, OutputFormat};

fn history_table(items: &[LibraryEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Title", "Position", "Last active"]);
    for item in items {
        table.add_row(vec![
            item.content_type.to_string(),
            item.title.clone(),
            item.position.clone().unwrap_or_else(|| "-".to_string()),
            item.last_active.clone(),
        ]);
    }
    table
}

fn favorites_table(items: &[LibraryEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Title", "Rating", "Status", "Added"]);
    for item in items {
        table.add_row(vec![
            item.content_type.to_string(),
            item.title.clone(),
            item.rating.clone().unwrap_or_else(|| "-".to_string()),
            item.status.clone().unwrap_or_else(|| "-".to_string()),
            item.last_active.clone(),
        ]);
    }
    table
}

pub fn run_library(
    content_type: Option<ContentType>,
    data_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = open_store(data_dir)?;
    let (history, favorites, leveling) = load_components(store);
    let view = LibraryView::new(&history, &favorites, &leveling);

    let history_items = view.history_items(content_type);
    let favorite_items = view.favorite_items(content_type);
    let state = view.progression();
    let progress = view.progress();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            output.info(format!(
                "Level {} | {} XP | {}/{} XP to the next level",
                state.level, state.xp, progress.earned_in_level, progress.needed_for_level
            ));

            output.info(format!("\nHistory ({})", history_items.len()));
            if history_items.is_empty() {
                output.info("History is empty");
            } else {
                println!("{}", history_table(&history_items));
            }

            output.info(format!("\nFavorites ({})", favorite_items.len()));
            if favorite_items.is_empty() {
                output.info("No favorites yet");
            } else {
                println!("{}", favorites_table(&favorite_items));
            }
        }
        _ => {
            let value = json!({
                "history": history_items,
                "favorites": favorite_items,
                "progression": state,
            });
            output.print_json(&value);
        }
    }
    Ok(())
}
