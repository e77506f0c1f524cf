use serde::{Deserialize, Serialize};

use crate::content::ContentType;

/// One row of the reading/watch history ledger.
///
/// Field names on disk match the legacy storage layout, so an existing
/// `reading-history` key deserializes unchanged. `timestamp` is Unix
/// milliseconds (write time). At most one entry exists per
/// `(content_type, slug)` pair; re-recording replaces and re-fronts it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub slug: String,
    pub title: String,
    pub cover: String,
    #[serde(rename = "lastChapter", skip_serializing_if = "Option::is_none")]
    pub last_chapter: Option<String>,
    #[serde(rename = "lastChapterSlug", skip_serializing_if = "Option::is_none")]
    pub last_chapter_slug: Option<String>,
    #[serde(rename = "lastEpisode", skip_serializing_if = "Option::is_none")]
    pub last_episode: Option<String>,
    #[serde(rename = "lastEpisodeId", skip_serializing_if = "Option::is_none")]
    pub last_episode_id: Option<String>,
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Display label for the most recently consumed sub-unit, if any.
    pub fn position_label(&self) -> Option<&str> {
        self.last_chapter
            .as_deref()
            .or(self.last_episode.as_deref())
    }
}

/// A history entry as submitted by a consumption event, before the ledger
/// stamps it with the current time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub content_type: ContentType,
    pub slug: String,
    pub title: String,
    pub cover: String,
    pub last_chapter: Option<String>,
    pub last_chapter_slug: Option<String>,
    pub last_episode: Option<String>,
    pub last_episode_id: Option<String>,
}

impl NewHistoryEntry {
    pub fn into_entry(self, timestamp: i64) -> HistoryEntry {
        HistoryEntry {
            content_type: self.content_type,
            slug: self.slug,
            title: self.title,
            cover: self.cover,
            last_chapter: self.last_chapter,
            last_chapter_slug: self.last_chapter_slug,
            last_episode: self.last_episode,
            last_episode_id: self.last_episode_id,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_uses_legacy_field_names() {
        let entry = NewHistoryEntry {
            content_type: ContentType::Comic,
            slug: "kingdom".to_string(),
            title: "Kingdom".to_string(),
            cover: "https://example.com/kingdom.jpg".to_string(),
            last_chapter: Some("Chapter 818".to_string()),
            last_chapter_slug: Some("kingdom-chapter-818".to_string()),
            last_episode: None,
            last_episode_id: None,
        }
        .into_entry(1_700_000_000_000);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "comic");
        assert_eq!(json["lastChapter"], "Chapter 818");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        // Absent position pointers are omitted, not null
        assert!(json.get("lastEpisode").is_none());
    }

    #[test]
    fn test_position_label_prefers_chapter() {
        let entry = NewHistoryEntry {
            content_type: ContentType::Anime,
            slug: "frieren".to_string(),
            title: "Frieren".to_string(),
            cover: String::new(),
            last_chapter: None,
            last_chapter_slug: None,
            last_episode: Some("12".to_string()),
            last_episode_id: Some("frieren-episode-12".to_string()),
        }
        .into_entry(0);
        assert_eq!(entry.position_label(), Some("12"));
    }
}
