use anyhow::Result;
use shelflog_models::{ContentType, HistoryEntry, NewHistoryEntry};
use shelflog_store::JsonStore;
use tracing::{debug, info};

use crate::now_millis;

pub const HISTORY_KEY: &str = "reading-history";
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// The reading/watch history ledger: an ordered, capped, de-duplicated log of
/// what the user was last consuming, most recent first.
///
/// Recency order is an invariant of storage, not a view-time sort: `record`
/// always moves the touched entry to the front before persisting. Mutations
/// persist the full list first and only then commit in memory, so a failed
/// write never leaves session state ahead of disk.
pub struct HistoryLedger {
    store: JsonStore,
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    /// Load the ledger from the store. Missing or corrupt data yields an
    /// empty ledger, never an error.
    pub fn load(store: JsonStore) -> Self {
        let entries: Vec<HistoryEntry> = store.read(HISTORY_KEY).unwrap_or_default();
        debug!("Loaded history ledger: {} entries", entries.len());
        Self { store, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a consumption event. Replaces any existing entry with the same
    /// `(content_type, slug)`, stamps it with the current time, prepends it,
    /// and truncates the ledger to the retention cap.
    pub fn record(&mut self, entry: NewHistoryEntry) -> Result<&HistoryEntry> {
        let stamped = entry.into_entry(now_millis());
        let content_type = stamped.content_type;
        let slug = stamped.slug.clone();

        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(stamped);
        next.extend(
            self.entries
                .iter()
                .filter(|h| !(h.content_type == content_type && h.slug == slug))
                .cloned(),
        );
        next.truncate(MAX_HISTORY_ENTRIES);

        self.store.write(HISTORY_KEY, &next)?;
        self.entries = next;
        Ok(&self.entries[0])
    }

    /// Drop the entry for `(content_type, slug)`. Returns whether an entry
    /// was actually removed; removing an absent entry is a no-op.
    pub fn remove(&mut self, content_type: ContentType, slug: &str) -> Result<bool> {
        let next: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|h| !(h.content_type == content_type && h.slug == slug))
            .cloned()
            .collect();

        if next.len() == self.entries.len() {
            return Ok(false);
        }

        self.store.write(HISTORY_KEY, &next)?;
        self.entries = next;
        Ok(true)
    }

    /// Empty the ledger and delete the backing key.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(HISTORY_KEY)?;
        let dropped = self.entries.len();
        self.entries.clear();
        info!("Cleared history ledger ({} entries)", dropped);
        Ok(())
    }

    /// All entries of one content type, in ledger order.
    pub fn by_type(&self, content_type: ContentType) -> Vec<&HistoryEntry> {
        self.entries
            .iter()
            .filter(|h| h.content_type == content_type)
            .collect()
    }

    /// Point lookup backing "continue reading/watching" affordances.
    pub fn find_last(&self, content_type: ContentType, slug: &str) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .find(|h| h.content_type == content_type && h.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelflog_store::ShelfPaths;
    use tempfile::TempDir;

    fn test_ledger() -> (TempDir, HistoryLedger) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(&ShelfPaths::with_base(dir.path())).unwrap();
        (dir, HistoryLedger::load(store))
    }

    fn comic_entry(slug: &str, chapter: &str) -> NewHistoryEntry {
        NewHistoryEntry {
            content_type: ContentType::Comic,
            slug: slug.to_string(),
            title: slug.to_string(),
            cover: format!("https://example.com/{}.jpg", slug),
            last_chapter: Some(chapter.to_string()),
            last_chapter_slug: Some(format!("{}-{}", slug, chapter.to_lowercase())),
            last_episode: None,
            last_episode_id: None,
        }
    }

    #[test]
    fn test_record_prepends_entry() {
        let (_dir, mut ledger) = test_ledger();
        ledger.record(comic_entry("kingdom", "Chapter 1")).unwrap();
        ledger.record(comic_entry("berserk", "Chapter 5")).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].slug, "berserk");
        assert_eq!(ledger.entries()[1].slug, "kingdom");
    }

    #[test]
    fn test_record_same_content_replaces_and_refronts() {
        let (_dir, mut ledger) = test_ledger();
        ledger.record(comic_entry("kingdom", "Chapter 818")).unwrap();
        ledger.record(comic_entry("berserk", "Chapter 5")).unwrap();
        ledger.record(comic_entry("kingdom", "Chapter 819")).unwrap();

        assert_eq!(ledger.len(), 2);
        let front = &ledger.entries()[0];
        assert_eq!(front.slug, "kingdom");
        assert_eq!(front.last_chapter.as_deref(), Some("Chapter 819"));
        // Exactly one kingdom entry remains
        assert_eq!(ledger.by_type(ContentType::Comic).len(), 2);
        assert_eq!(
            ledger
                .entries()
                .iter()
                .filter(|h| h.slug == "kingdom")
                .count(),
            1
        );
    }

    #[test]
    fn test_ledger_caps_at_max_entries() {
        let (_dir, mut ledger) = test_ledger();
        for i in 0..MAX_HISTORY_ENTRIES + 1 {
            ledger
                .record(comic_entry(&format!("comic-{}", i), "Chapter 1"))
                .unwrap();
        }

        assert_eq!(ledger.len(), MAX_HISTORY_ENTRIES);
        // The oldest entry was evicted, the newest is at the front
        assert_eq!(ledger.entries()[0].slug, "comic-100");
        assert!(ledger.find_last(ContentType::Comic, "comic-0").is_none());
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let (_dir, mut ledger) = test_ledger();
        ledger.record(comic_entry("kingdom", "Chapter 1")).unwrap();

        assert!(!ledger.remove(ContentType::Comic, "berserk").unwrap());
        assert!(!ledger.remove(ContentType::Novel, "kingdom").unwrap());
        assert!(ledger.remove(ContentType::Comic, "kingdom").unwrap());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_clear_deletes_backing_key() {
        let (dir, mut ledger) = test_ledger();
        ledger.record(comic_entry("kingdom", "Chapter 1")).unwrap();
        assert!(dir.path().join("reading-history.json").exists());

        ledger.clear().unwrap();
        assert!(ledger.is_empty());
        assert!(!dir.path().join("reading-history.json").exists());

        // A fresh load after clear sees an empty ledger, not an error
        let store = JsonStore::new(&ShelfPaths::with_base(dir.path())).unwrap();
        assert!(HistoryLedger::load(store).is_empty());
    }

    #[test]
    fn test_by_type_preserves_ledger_order() {
        let (_dir, mut ledger) = test_ledger();
        ledger.record(comic_entry("a", "Chapter 1")).unwrap();
        ledger
            .record(NewHistoryEntry {
                content_type: ContentType::Anime,
                slug: "frieren".to_string(),
                title: "Frieren".to_string(),
                cover: String::new(),
                last_chapter: None,
                last_chapter_slug: None,
                last_episode: Some("3".to_string()),
                last_episode_id: Some("frieren-episode-3".to_string()),
            })
            .unwrap();
        ledger.record(comic_entry("b", "Chapter 2")).unwrap();

        let comics = ledger.by_type(ContentType::Comic);
        assert_eq!(comics.len(), 2);
        assert_eq!(comics[0].slug, "b");
        assert_eq!(comics[1].slug, "a");
    }

    #[test]
    fn test_ledger_survives_reload() {
        let dir = TempDir::new().unwrap();
        {
            let store = JsonStore::new(&ShelfPaths::with_base(dir.path())).unwrap();
            let mut ledger = HistoryLedger::load(store);
            ledger.record(comic_entry("kingdom", "Chapter 818")).unwrap();
        }
        let store = JsonStore::new(&ShelfPaths::with_base(dir.path())).unwrap();
        let ledger = HistoryLedger::load(store);
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger
                .find_last(ContentType::Comic, "kingdom")
                .and_then(|h| h.last_chapter.as_deref()),
            Some("Chapter 818")
        );
    }

    #[test]
    fn test_corrupt_ledger_loads_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("reading-history.json"), "not json at all").unwrap();
        let store = JsonStore::new(&ShelfPaths::with_base(dir.path())).unwrap();
        let ledger = HistoryLedger::load(store);
        assert!(ledger.is_empty());
    }
}
