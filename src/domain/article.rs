use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publisher attribution as returned by the news API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A single headline.
///
/// Field names follow the news API wire format so that favorites snapshots
/// are stored exactly as they were received. The title is the identity key:
/// two articles with the same title are the same article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// Raw timestamp string, parsed on demand by [`Article::published`].
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Identity key used for favoriting and deduplication.
    pub fn key(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    pub fn display_author(&self) -> &str {
        match self.author.as_deref() {
            Some(author) if !author.trim().is_empty() => author,
            _ => "Unknown Author",
        }
    }

    /// Parsed publication time, or `None` when missing or unparsable.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| raw.parse::<DateTime<Utc>>().ok())
    }
}
