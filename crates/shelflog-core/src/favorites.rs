use anyhow::Result;
use shelflog_models::{ContentType, FavoriteEntry, NewFavoriteEntry};
use shelflog_store::JsonStore;
use tracing::{debug, info};

use crate::now_millis;

pub const FAVORITES_KEY: &str = "favorites";

/// The set of bookmarked content, ordered most-recent-add first.
///
/// Unlike the history ledger, `add` is idempotent without a refresh: adding
/// an already-present `(content_type, slug)` changes nothing, not even the
/// timestamp. The set never expires entries and has no size cap.
pub struct FavoritesSet {
    store: JsonStore,
    entries: Vec<FavoriteEntry>,
}

impl FavoritesSet {
    /// Load favorites from the store. Missing or corrupt data yields an
    /// empty set, never an error.
    pub fn load(store: JsonStore) -> Self {
        let entries: Vec<FavoriteEntry> = store.read(FAVORITES_KEY).unwrap_or_default();
        debug!("Loaded favorites: {} entries", entries.len());
        Self { store, entries }
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, content_type: ContentType, slug: &str) -> bool {
        self.entries
            .iter()
            .any(|f| f.content_type == content_type && f.slug == slug)
    }

    /// Add a favorite with a fresh timestamp. Returns false (and changes
    /// nothing) if the key is already present.
    pub fn add(&mut self, entry: NewFavoriteEntry) -> Result<bool> {
        if self.contains(entry.content_type, &entry.slug) {
            return Ok(false);
        }

        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry.into_entry(now_millis()));
        next.extend(self.entries.iter().cloned());

        self.store.write(FAVORITES_KEY, &next)?;
        self.entries = next;
        Ok(true)
    }

    /// Remove a favorite. Returns whether an entry was actually removed;
    /// removing an absent key is a no-op.
    pub fn remove(&mut self, content_type: ContentType, slug: &str) -> Result<bool> {
        let next: Vec<FavoriteEntry> = self
            .entries
            .iter()
            .filter(|f| !(f.content_type == content_type && f.slug == slug))
            .cloned()
            .collect();

        if next.len() == self.entries.len() {
            return Ok(false);
        }

        self.store.write(FAVORITES_KEY, &next)?;
        self.entries = next;
        Ok(true)
    }

    /// Flip membership for the entry's key. Returns true if the content is
    /// favorited after the call.
    pub fn toggle(&mut self, entry: NewFavoriteEntry) -> Result<bool> {
        if self.contains(entry.content_type, &entry.slug) {
            self.remove(entry.content_type, &entry.slug)?;
            Ok(false)
        } else {
            self.add(entry)?;
            Ok(true)
        }
    }

    /// Empty the set and delete the backing key.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(FAVORITES_KEY)?;
        let dropped = self.entries.len();
        self.entries.clear();
        info!("Cleared favorites ({} entries)", dropped);
        Ok(())
    }

    /// All favorites of one content type, in insertion order.
    pub fn by_type(&self, content_type: ContentType) -> Vec<&FavoriteEntry> {
        self.entries
            .iter()
            .filter(|f| f.content_type == content_type)
            .collect()
    }
}
