use serde::{Deserialize, Serialize};

use crate::content::ContentType;

/// A bookmarked piece of content.
///
/// Display metadata is a snapshot captured at favoriting time; it is never
/// refreshed afterwards. `timestamp` is Unix milliseconds (add time).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub slug: String,
    pub title: String,
    pub cover: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub timestamp: i64,
}

/// Favorite data as submitted by the "add" action, before the set stamps it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFavoriteEntry {
    pub content_type: ContentType,
    pub slug: String,
    pub title: String,
    pub cover: String,
    pub rating: Option<String>,
    pub status: Option<String>,
}

impl NewFavoriteEntry {
    pub fn into_entry(self, timestamp: i64) -> FavoriteEntry {
        FavoriteEntry {
            content_type: self.content_type,
            slug: self.slug,
            title: self.title,
            cover: self.cover,
            rating: self.rating,
            status: self.status,
            timestamp,
        }
    }
}
