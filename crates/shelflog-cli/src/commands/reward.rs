use anyhow::Result;
use serde_json::json;
use shelflog_core::LevelingEngine;
use shelflog_models::RewardAction;
use std::path::PathBuf;

use super::open_store;
use crate::output::{Output, OutputFormat};

pub fn run_reward(
    action: RewardAction,
    data_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut engine = LevelingEngine::load(store);

    let level_before = engine.state().level;
    let state = engine.grant(action)?.clone();
    let progress = engine.progress();

    match output.format() {
        OutputFormat::Human => {
            output.success(format!(
                "+{} XP for {} ({} XP total)",
                action.xp(),
                action,
                state.xp
            ));
            if state.level > level_before {
                output.success(format!("Level up! You are now level {}", state.level));
            } else {
                output.info(format!(
                    "Level {}: {}/{} XP to the next level",
                    state.level, progress.earned_in_level, progress.needed_for_level
                ));
            }
        }
        _ => {
            let mut value = serde_json::to_value(&state)?;
            value["action"] = json!(action.as_str());
            value["xpGained"] = json!(action.xp());
            value["leveledUp"] = json!(state.level > level_before);
            output.print_json(&value);
        }
    }
    Ok(())
}
