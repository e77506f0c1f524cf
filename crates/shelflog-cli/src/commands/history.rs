use anyhow::Result;
use comfy_table::Table;
use shelflog_core::{HistoryLedger, LibraryView};
use shelflog_models::ContentType;
use std::path::PathBuf;

use super::{load_components, open_store};
use crate::output::{Output, OutputFormat};

pub fn run_list(
    content_type: Option<ContentType>,
    limit: Option<usize>,
    data_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = open_store(data_dir)?;
    let (history, favorites, leveling) = load_components(store);
    let view = LibraryView::new(&history, &favorites, &leveling);

    let mut items = view.history_items(content_type);
    if let Some(limit) = limit {
        items.truncate(limit);
    }

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            if items.is_empty() {
                output.info("History is empty");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Type", "Title", "Position", "Last active"]);
            for item in &items {
                table.add_row(vec![
                    item.content_type.to_string(),
                    item.title.clone(),
                    item.position.clone().unwrap_or_else(|| "-".to_string()),
                    item.last_active.clone(),
                ]);
            }
            println!("{table}");
        }
        _ => output.print_json(&serde_json::to_value(&items)?),
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
    let mut ledger = HistoryLedger::load(store);

    if ledger.remove(content_type, slug)? {
        output.success(format!("Removed {} '{}' from history", content_type, slug));
    } else {
        output.warning(format!("No history entry for {} '{}'", content_type, slug));
    }
    Ok(())
}

pub fn run_clear(data_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut ledger = HistoryLedger::load(store);
    let count = ledger.len();
    ledger.clear()?;
    output.success(format!("Cleared history ({} entries)", count));
    Ok(())
}
