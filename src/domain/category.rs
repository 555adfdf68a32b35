use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::NewsdeskError;

/// Topical partition of the headline feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    /// Name as used in API requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Next category in list order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = NewsdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| NewsdeskError::InvalidCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!("Sports".parse::<Category>().unwrap(), Category::Sports);
        assert_eq!(" science ".parse::<Category>().unwrap(), Category::Science);
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "weather".parse::<Category>().unwrap_err();
        assert!(matches!(err, NewsdeskError::InvalidCategory(ref name) if name == "weather"));
    }

    #[test]
    fn test_next_prev_wrap() {
        assert_eq!(Category::General.next(), Category::Business);
        assert_eq!(Category::Technology.next(), Category::General);
        assert_eq!(Category::General.prev(), Category::Technology);
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(Category::default(), Category::General);
    }
}
