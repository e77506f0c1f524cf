use anyhow::{bail, Result};
use shelflog_core::{FavoritesSet, HistoryLedger, LevelingEngine, Session};
use std::path::PathBuf;

use super::open_store;
use crate::output::Output;

pub fn run_clear(
    all: bool,
    history: bool,
    favorites: bool,
    level: bool,
    data_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    if !all && !history && !favorites && !level {
        output.error("Nothing to clear: pass --history, --favorites, --level, or --all");
        bail!("no clear target specified");
    }

    let store = open_store(data_dir)?;

    if all || history {
        let mut ledger = HistoryLedger::load(store.clone());
        let count = ledger.len();
        ledger.clear()?;
        output.success(format!("Cleared history ({} entries)", count));
    }

    if all || favorites {
        let mut set = FavoritesSet::load(store.clone());
        let count = set.len();
        set.clear()?;
        output.success(format!("Cleared favorites ({} entries)", count));
    }

    if all || level {
        let mut engine = LevelingEngine::load(store.clone());
        engine.reset()?;
        output.success("Reset level progression");
    }

    if all {
        let mut session = Session::load(store);
        if session.is_authenticated() {
            session.logout()?;
            output.success("Signed out");
        }
    }

    Ok(())
}
