pub mod favorites;
pub mod history;
pub mod leveling;
pub mod library;
pub mod session;

pub use favorites::FavoritesSet;
pub use history::HistoryLedger;
pub use leveling::{level_from_xp, xp_for_level, LevelProgress, LevelingEngine};
pub use library::{relative_time, LibraryEntry, LibraryView};
pub use session::Session;

/// Current wall-clock time as Unix milliseconds, the timestamp unit used by
/// every persisted record.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
