use anyhow::Result;
use comfy_table::Table;
use serde_json::json;
use shelflog_core::LevelingEngine;
use std::path::PathBuf;

use super::open_store;
use crate::output::{Output, OutputFormat};

pub fn run_stats(data_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = open_store(data_dir)?;
    let engine = LevelingEngine::load(store);
    let state = engine.state();
    let progress = engine.progress();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Stat", "Value"]);
            table.add_row(vec!["Level".to_string(), state.level.to_string()]);
            table.add_row(vec!["Total XP".to_string(), state.xp.to_string()]);
            table.add_row(vec![
                "Next level".to_string(),
                format!(
                    "{}/{} XP ({:.0}%)",
                    progress.earned_in_level, progress.needed_for_level, progress.percentage
                ),
            ]);
            table.add_row(vec![
                "Chapters read".to_string(),
                state.total_chapters_read.to_string(),
            ]);
            table.add_row(vec![
                "Episodes watched".to_string(),
                state.total_episodes_watched.to_string(),
            ]);
            table.add_row(vec![
                "Comics finished".to_string(),
                state.comics_read.to_string(),
            ]);
            table.add_row(vec![
                "Novels finished".to_string(),
                state.novels_read.to_string(),
            ]);
            table.add_row(vec![
                "Anime finished".to_string(),
                state.anime_watched.to_string(),
            ]);
            table.add_row(vec![
                "Donghua finished".to_string(),
                state.donghua_watched.to_string(),
            ]);
            println!("{table}");
        }
        _ => {
            let mut value = serde_json::to_value(state)?;
            value["progress"] = json!({
                "earnedInLevel": progress.earned_in_level,
                "neededForLevel": progress.needed_for_level,
                "percentage": progress.percentage,
            });
            output.print_json(&value);
        }
    }
    Ok(())
}
