//! Content items: magazines, articles and digests.
//!
//! The API returns one shape for all three, discriminated by the
//! `magzineType` tag (the API's spelling).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Which of the three content families an item belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContentKind {
    #[default]
    Magazine,
    Article,
    Digest,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Magazine, ContentKind::Article, ContentKind::Digest];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Magazine => "magazine",
            ContentKind::Article => "article",
            ContentKind::Digest => "digest",
        }
    }

    /// Lenient parse; anything unrecognised is a magazine.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "article" | "articles" => ContentKind::Article,
            "digest" | "digests" => ContentKind::Digest,
            _ => ContentKind::Magazine,
        }
    }

    /// Strict parse for user input (CLI arguments).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "magazine" | "magazines" => Some(ContentKind::Magazine),
            "article" | "articles" => Some(ContentKind::Article),
            "digest" | "digests" => Some(ContentKind::Digest),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContentKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag: Option<String> = Option::deserialize(deserializer)?;
        Ok(tag.map(|t| ContentKind::from_tag(&t)).unwrap_or_default())
    }
}

/// Free or paid access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AccessTier {
    #[default]
    Free,
    Paid,
}

impl AccessTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessTier::Free => "free",
            AccessTier::Paid => "paid",
        }
    }
}

impl Serialize for AccessTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AccessTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag: Option<String> = Option::deserialize(deserializer)?;
        Ok(match tag.as_deref().map(|t| t.trim().to_ascii_lowercase()) {
            Some(t) if t == "paid" || t == "premium" => AccessTier::Paid,
            _ => AccessTier::Free,
        })
    }
}

/// A reader review nested inside a content item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A magazine, article or digest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(rename = "magzineType", default)]
    pub kind: ContentKind,
    #[serde(rename = "type", default)]
    pub tier: AccessTier,
    /// Downloadable document URL.
    #[serde(default)]
    pub file: Option<String>,
    /// Ordered page image URLs for the reader.
    #[serde(default)]
    pub pages: Vec<String>,
}

impl ContentItem {
    pub fn is_paid(&self) -> bool {
        self.tier == AccessTier::Paid
    }

    /// Mean of the nested review ratings, `None` without reviews.
    pub fn average_review_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f64 = self.reviews.iter().map(|r| r.rating).sum();
        Some(total / self.reviews.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_item_from_api_payload() {
        let json = r#"{
            "_id": "m1",
            "name": "Tech Monthly",
            "image": "https://cdn.example.com/tm.jpg",
            "category": "Technology",
            "rating": 4.5,
            "downloads": 1200,
            "reviews": [{"user": "ada", "rating": 5, "comment": "Great"}],
            "magzineType": "digest",
            "type": "paid",
            "pages": ["https://cdn.example.com/tm/1.jpg"]
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "m1");
        assert_eq!(item.kind, ContentKind::Digest);
        assert_eq!(item.tier, AccessTier::Paid);
        assert!(item.is_paid());
        assert_eq!(item.reviews.len(), 1);
        assert_eq!(item.pages.len(), 1);
        assert_eq!(item.average_review_rating(), Some(5.0));
    }

    #[test]
    fn test_missing_or_unknown_tags_default() {
        let item: ContentItem = serde_json::from_str(r#"{"id":"x","name":"X"}"#).unwrap();
        assert_eq!(item.kind, ContentKind::Magazine);
        assert_eq!(item.tier, AccessTier::Free);
        assert!(item.average_review_rating().is_none());

        let odd: ContentItem =
            serde_json::from_str(r#"{"id":"y","name":"Y","magzineType":"poster","type":null}"#)
                .unwrap();
        assert_eq!(odd.kind, ContentKind::Magazine);
        assert_eq!(odd.tier, AccessTier::Free);
    }

    #[test]
    fn test_unnamed_item_keeps_listing_decodable() {
        let items: Vec<ContentItem> = serde_json::from_str(
            r#"[{"_id":"m1","name":"Tech Weekly"},{"_id":"m2","magzineType":"digest"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "m2");
        assert!(items[1].name.is_empty());
        assert_eq!(items[1].kind, ContentKind::Digest);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let item = ContentItem {
            id: "a".to_string(),
            name: "A".to_string(),
            kind: ContentKind::Article,
            ..ContentItem::default()
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["magzineType"], "article");
        assert_eq!(value["type"], "free");
        assert_eq!(value["_id"], "a");
    }

    #[test]
    fn test_kind_parse_is_strict() {
        assert_eq!(ContentKind::parse("Articles"), Some(ContentKind::Article));
        assert_eq!(ContentKind::parse("digest"), Some(ContentKind::Digest));
        assert_eq!(ContentKind::parse("poster"), None);
        assert_eq!(ContentKind::from_tag("poster"), ContentKind::Magazine);
    }
}
