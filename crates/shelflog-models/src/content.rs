use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tag used as part of the identity key for history and favorites.
///
/// The ledger and favorites originally tracked only comic/novel/anime while
/// the reward table already knew about donghua; the enum is unified to four
/// variants so donghua consumption is recordable everywhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Comic,
    Novel,
    Anime,
    Donghua,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Comic => "comic",
            ContentType::Novel => "novel",
            ContentType::Anime => "anime",
            ContentType::Donghua => "donghua",
        }
    }

    /// Whether progress through this content is measured in chapters
    /// (as opposed to episodes).
    pub fn is_textual(&self) -> bool {
        matches!(self, ContentType::Comic | ContentType::Novel)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comic" => Ok(ContentType::Comic),
            "novel" => Ok(ContentType::Novel),
            "anime" => Ok(ContentType::Anime),
            "donghua" => Ok(ContentType::Donghua),
            _ => Err(format!(
                "Invalid content type: {}. Use 'comic', 'novel', 'anime', or 'donghua'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_serializes_lowercase() {
        let json = serde_json::to_string(&ContentType::Donghua).unwrap();
        assert_eq!(json, "\"donghua\"");
    }

    #[test]
    fn test_content_type_parses_case_insensitive() {
        assert_eq!("Comic".parse::<ContentType>().unwrap(), ContentType::Comic);
        assert!("manga".parse::<ContentType>().is_err());
    }
}
