use chrono::TimeZone;
use serde::Serialize;
use shelflog_models::{ContentType, FavoriteEntry, HistoryEntry, ProgressionState};

use crate::favorites::FavoritesSet;
use crate::history::HistoryLedger;
use crate::leveling::{LevelProgress, LevelingEngine};

/// Bucketed "time since last activity" label for a millisecond timestamp:
/// minutes under an hour, hours under a day, days under a week, then the
/// calendar date.
pub fn relative_time(timestamp: i64, now: i64) -> String {
    let diff_ms = (now - timestamp).max(0);
    let diff_mins = diff_ms / 60_000;
    let diff_hours = diff_ms / 3_600_000;
    let diff_days = diff_ms / 86_400_000;

    if diff_mins < 60 {
        format!("{}m ago", diff_mins)
    } else if diff_hours < 24 {
        format!("{}h ago", diff_hours)
    } else if diff_days < 7 {
        format!("{}d ago", diff_days)
    } else {
        match chrono::Utc.timestamp_millis_opt(timestamp).single() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => format!("{}d ago", diff_days),
        }
    }
}

/// One row of the library presentation, shaped for rendering rather than
/// storage.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LibraryEntry {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub slug: String,
    pub title: String,
    pub cover: String,
    /// Last consumed chapter/episode label, when the ledger knows one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub timestamp: i64,
    pub last_active: String,
}

impl LibraryEntry {
    fn from_history(entry: &HistoryEntry, now: i64) -> Self {
        Self {
            content_type: entry.content_type,
            slug: entry.slug.clone(),
            title: entry.title.clone(),
            cover: entry.cover.clone(),
            position: entry.position_label().map(str::to_string),
            rating: None,
            status: None,
            timestamp: entry.timestamp,
            last_active: relative_time(entry.timestamp, now),
        }
    }

    fn from_favorite(entry: &FavoriteEntry, now: i64) -> Self {
        Self {
            content_type: entry.content_type,
            slug: entry.slug.clone(),
            title: entry.title.clone(),
            cover: entry.cover.clone(),
            position: None,
            rating: entry.rating.clone(),
            status: entry.status.clone(),
            timestamp: entry.timestamp,
            last_active: relative_time(entry.timestamp, now),
        }
    }
}

/// Read-only composition of the history ledger, favorites set, and leveling
/// engine into a filterable presentation model. Performs no mutation; all
/// writes route through the three underlying components.
pub struct LibraryView<'a> {
    history: &'a HistoryLedger,
    favorites: &'a FavoritesSet,
    leveling: &'a LevelingEngine,
}

impl<'a> LibraryView<'a> {
    pub fn new(
        history: &'a HistoryLedger,
        favorites: &'a FavoritesSet,
        leveling: &'a LevelingEngine,
    ) -> Self {
        Self {
            history,
            favorites,
            leveling,
        }
    }

    /// History rows, ledger order, optionally narrowed to one content type.
    pub fn history_items(&self, filter: Option<ContentType>) -> Vec<LibraryEntry> {
        let now = crate::now_millis();
        self.history
            .entries()
            .iter()
            .filter(|h| filter.map_or(true, |t| h.content_type == t))
            .map(|h| LibraryEntry::from_history(h, now))
            .collect()
    }

    /// Favorite rows, insertion order, optionally narrowed to one content
    /// type.
    pub fn favorite_items(&self, filter: Option<ContentType>) -> Vec<LibraryEntry> {
        let now = crate::now_millis();
        self.favorites
            .entries()
            .iter()
            .filter(|f| filter.map_or(true, |t| f.content_type == t))
            .map(|f| LibraryEntry::from_favorite(f, now))
            .collect()
    }

    pub fn progression(&self) -> &ProgressionState {
        self.leveling.state()
    }

    pub fn progress(&self) -> LevelProgress {
        self.leveling.progress()
    }
}
