use anyhow::Result;
use comfy_table::Table;
use shelflog_core::{FavoritesSet, LibraryView};
use shelflog_models::{ContentType, NewFavoriteEntry};
use std::path::PathBuf;

use super::{load_components, open_store};
use crate::output::{Output, OutputFormat};
use crate::FavoriteArgs;

fn new_entry(args: FavoriteArgs) -> NewFavoriteEntry {
    NewFavoriteEntry {
        content_type: args.content_type,
        slug: args.slug,
        title: args.title,
        cover: args.cover,
        rating: args.rating,
        status: args.status,
    }
}

pub fn run_add(args: FavoriteArgs, data_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut favorites = FavoritesSet::load(store);

    let entry = new_entry(args);
    let label = format!("{} '{}'", entry.content_type, entry.title);
    if favorites.add(entry)? {
        output.success(format!("Added {} to favorites", label));
    } else {
        output.warning(format!("{} is already a favorite", label));
    }
    Ok(())
}

pub fn run_toggle(args: FavoriteArgs, data_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut favorites = FavoritesSet::load(store);

    let entry = new_entry(args);
    let label = format!("{} '{}'", entry.content_type, entry.title);
    if favorites.toggle(entry)? {
        output.success(format!("Added {} to favorites", label));
    } else {
        output.success(format!("Removed {} from favorites", label));
    }
    Ok(())
}

pub fn run_remove(
    content_type: ContentType,
    slug: &str,
    data_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut favorites = FavoritesSet::load(store);

    if favorites.remove(content_type, slug)? {
        output.success(format!("Removed {} '{}' from favorites", content_type, slug));
    } else {
        output.warning(format!("No favorite for {} '{}'", content_type, slug));
    }
    Ok(())
}

pub fn run_list(
    content_type: Option<ContentType>,
    data_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = open_store(data_dir)?;
    let (history, favorites, leveling) = load_components(store);
    let view = LibraryView::new(&history, &favorites, &leveling);

    let items = view.favorite_items(content_type);

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            if items.is_empty() {
                output.info("No favorites yet");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Type", "Title", "Rating", "Status", "Added"]);
            for item in &items {
                table.add_row(vec![
                    item.content_type.to_string(),
                    item.title.clone(),
                    item.rating.clone().unwrap_or_else(|| "-".to_string()),
                    item.status.clone().unwrap_or_else(|| "-".to_string()),
                    item.last_active.clone(),
                ]);
            }
            println!("{table}");
        }
        _ => output.print_json(&serde_json::to_value(&items)?),
    }
    Ok(())
}

pub fn run_clear(data_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut favorites = FavoritesSet::load(store);
    let count = favorites.len();
    favorites.clear()?;
    output.success(format!("Cleared favorites ({} entries)", count));
    Ok(())
}
