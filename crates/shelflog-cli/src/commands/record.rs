use anyhow::Result;
use shelflog_core::HistoryLedger;
use shelflog_models::NewHistoryEntry;
use std::path::PathBuf;

use super::open_store;
use crate::output::Output;
use crate::RecordArgs;

pub fn run_record(args: RecordArgs, data_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut ledger = HistoryLedger::load(store);

    let entry = ledger.record(NewHistoryEntry {
        content_type: args.content_type,
        slug: args.slug,
        title: args.title,
        cover: args.cover,
        last_chapter: args.chapter,
        last_chapter_slug: args.chapter_slug,
        last_episode: args.episode,
        last_episode_id: args.episode_id,
    })?;

    match entry.position_label() {
        Some(position) => output.success(format!(
            "Recorded {} '{}' at {}",
            entry.content_type, entry.title, position
        )),
        None => output.success(format!("Recorded {} '{}'", entry.content_type, entry.title)),
    }
    Ok(())
}
