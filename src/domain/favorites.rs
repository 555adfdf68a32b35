use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Article;

/// Saved articles keyed by title, in the order they were saved.
///
/// Serializes as a plain JSON array of article snapshots. Equality is set
/// equality: order does not matter.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Favorites {
    articles: Vec<Article>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from stored snapshots. Later duplicates of a title are dropped.
    pub fn from_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let mut favorites = Self::new();
        for article in articles {
            if !favorites.contains(article.key()) {
                favorites.articles.push(article);
            }
        }
        favorites
    }

    pub fn contains(&self, title: &str) -> bool {
        self.articles.iter().any(|a| a.key() == title)
    }

    pub fn get(&self, title: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.key() == title)
    }

    /// Remove the article if its title is saved, otherwise save a snapshot.
    /// Returns whether the article is a favorite afterwards.
    pub fn toggle(&mut self, article: &Article) -> bool {
        if let Some(pos) = self.articles.iter().position(|a| a.key() == article.key()) {
            self.articles.remove(pos);
            false
        } else {
            self.articles.push(article.clone());
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl PartialEq for Favorites {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .articles
                .iter()
                .all(|a| other.get(a.key()).is_some_and(|b| a == b))
    }
}

impl Eq for Favorites {}

impl<'de> Deserialize<'de> for Favorites {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let articles = Vec::<Article>::deserialize(deserializer)?;
        Ok(Self::from_articles(articles))
    }
}
