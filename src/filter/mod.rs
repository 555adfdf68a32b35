use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::app::{NewsdeskError, Result};
use crate::domain::Article;

/// Inclusive publication-time bounds. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Parse user-entered bounds. Empty input leaves that end open.
    ///
    /// A plain `YYYY-MM-DD` covers the whole day: `from` starts at midnight UTC
    /// and `to` runs to the last instant of the day. A date-only `to` therefore
    /// admits articles published later that day, rather than cutting off at its
    /// midnight.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Ok(Self {
            from: parse_bound(from, NaiveTime::MIN)?,
            to: parse_bound(to, end_of_day())?,
        })
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    fn contains(&self, published: Option<DateTime<Utc>>) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(published) = published else {
            return false;
        };
        self.from.is_none_or(|from| published >= from) && self.to.is_none_or(|to| published <= to)
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

fn parse_bound(input: &str, time_of_day: NaiveTime) -> Result<Option<DateTime<Utc>>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(Some(date.and_time(time_of_day).and_utc()));
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| NewsdeskError::InvalidDate(input.to_string()))
}

/// Locally applied view criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.date_range.is_open()
    }
}

/// Whether `article` belongs in the displayed view under `criteria`.
pub fn include(article: &Article, criteria: &FilterCriteria) -> bool {
    matches_search(article, &criteria.search_term)
        && criteria.date_range.contains(article.published())
}

fn matches_search(article: &Article, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    };
    contains(&article.title) || contains(&article.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, published_at: Option<&str>) -> Article {
        let mut article = Article::new(title);
        article.published_at = published_at.map(String::from);
        article
    }

    fn search(term: &str) -> FilterCriteria {
        FilterCriteria {
            search_term: term.to_string(),
            ..Default::default()
        }
    }

    fn since(from: &str) -> FilterCriteria {
        FilterCriteria {
            date_range: DateRange::parse(from, "").unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_criteria_includes_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(include(&Article::default(), &criteria));
        assert!(include(&article("x", Some("garbage")), &criteria));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let criteria = search("alpha");
        assert!(include(&article("Alpha Report", None), &criteria));
        assert!(!include(&article("Beta News", None), &criteria));

        assert!(include(&article("ALPHA", None), &search("AlPhA")));
    }

    #[test]
    fn test_search_matches_description() {
        let mut a = article("Beta News", None);
        a.description = Some("An alpha particle walks into a bar".into());
        assert!(include(&a, &search("alpha")));
    }

    #[test]
    fn test_search_missing_fields_do_not_match() {
        assert!(!include(&Article::default(), &search("anything")));
    }

    #[test]
    fn test_from_boundary() {
        let criteria = since("2024-01-02");
        assert!(!include(
            &article("late", Some("2024-01-01T23:59:59Z")),
            &criteria
        ));
        assert!(include(
            &article("on time", Some("2024-01-02T00:00:00Z")),
            &criteria
        ));
    }

    #[test]
    fn test_to_covers_whole_day() {
        let criteria = FilterCriteria {
            date_range: DateRange::parse("", "2024-01-02").unwrap(),
            ..Default::default()
        };
        assert!(include(&article("a", Some("2024-01-02T23:59:59Z")), &criteria));
        assert!(!include(&article("b", Some("2024-01-03T00:00:00Z")), &criteria));
    }

    #[test]
    fn test_single_day_range() {
        let criteria = FilterCriteria {
            date_range: DateRange::parse("2024-01-02", "2024-01-02").unwrap(),
            ..Default::default()
        };
        assert!(include(&article("a", Some("2024-01-02T12:00:00Z")), &criteria));
        assert!(!include(&article("b", Some("2024-01-01T12:00:00Z")), &criteria));
    }

    #[test]
    fn test_unparsable_date_fails_closed() {
        let broken = article("broken", Some("not a date"));
        let undated = article("undated", None);
        assert!(!include(&broken, &since("2024-01-01")));
        assert!(!include(&undated, &since("2024-01-01")));
        assert!(include(&broken, &search("broken")));
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let criteria = FilterCriteria {
            search_term: "alpha".into(),
            date_range: DateRange::parse("2024-01-02", "").unwrap(),
        };
        assert!(include(
            &article("Alpha", Some("2024-01-03T00:00:00Z")),
            &criteria
        ));
        assert!(!include(
            &article("Alpha", Some("2024-01-01T00:00:00Z")),
            &criteria
        ));
        assert!(!include(
            &article("Beta", Some("2024-01-03T00:00:00Z")),
            &criteria
        ));
    }

    #[test]
    fn test_parse_rfc3339_bound() {
        let range = DateRange::parse("2024-01-02T06:00:00+02:00", "").unwrap();
        assert_eq!(
            range.from.unwrap().to_rfc3339(),
            "2024-01-02T04:00:00+00:00"
        );
    }

    #[test]
    fn test_parse_invalid_bound() {
        let err = DateRange::parse("02/01/2024", "").unwrap_err();
        assert!(matches!(err, NewsdeskError::InvalidDate(ref s) if s == "02/01/2024"));
    }

    #[test]
    fn test_parse_empty_is_open() {
        let range = DateRange::parse("  ", "").unwrap();
        assert!(range.is_open());
    }
}
