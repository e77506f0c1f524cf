pub mod clear;
pub mod favorites;
pub mod history;
pub mod library;
pub mod record;
pub mod reward;
pub mod session;
pub mod stats;

use anyhow::Result;
use shelflog_core::{FavoritesSet, HistoryLedger, LevelingEngine};
use shelflog_store::{JsonStore, ShelfPaths};
use std::path::PathBuf;
use tracing::debug;

/// Open the JSON store, honoring an explicit `--data-dir` override.
pub fn open_store(data_dir: Option<PathBuf>) -> Result<JsonStore> {
    let paths = match data_dir {
        Some(dir) => ShelfPaths::with_base(dir),
        None => ShelfPaths::default(),
    };
    paths.ensure_directories()?;
    debug!("Using data directory {:?}", paths.data_dir());
    Ok(JsonStore::new(&paths)?)
}

/// Load the three live states the library view composes over.
pub fn load_components(store: JsonStore) -> (HistoryLedger, FavoritesSet, LevelingEngine) {
    (
        HistoryLedger::load(store.clone()),
        FavoritesSet::load(store.clone()),
        LevelingEngine::load(store),
    )
}
