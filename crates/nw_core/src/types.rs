use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::{Error, Result};

/// Provider-independent article record.
///
/// Every field is optional because providers routinely omit them. Absent values
/// serialize as `null` so consumers always see the same set of keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Option<ArticleSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    /// Provider-native timestamp, kept as text.
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub name: String,
}

impl ArticleSource {
    /// Builds a source only when the provider gave a non-empty name.
    pub fn from_name(name: Option<String>) -> Option<Self> {
        name.filter(|n| !n.is_empty()).map(|name| Self { name })
    }
}

/// Articles grouped by the keyword option that produced them, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordArticles {
    entries: Vec<(String, Vec<Article>)>,
}

impl KeywordArticles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the articles for `keyword`. An existing keyword keeps its
    /// position and has its articles replaced; the old articles are returned.
    pub fn insert(&mut self, keyword: impl Into<String>, articles: Vec<Article>) -> Option<Vec<Article>> {
        let keyword = keyword.into();
        match self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            Some((_, existing)) => Some(std::mem::replace(existing, articles)),
            None => {
                self.entries.push((keyword, articles));
                None
            }
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&[Article]> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, articles)| articles.as_slice())
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Article])> {
        self.entries.iter().map(|(k, a)| (k.as_str(), a.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens into a single list: keyword order first, then item order.
    pub fn into_articles(self) -> Vec<Article> {
        self.entries.into_iter().flat_map(|(_, articles)| articles).collect()
    }
}

impl IntoIterator for KeywordArticles {
    type Item = (String, Vec<Article>);
    type IntoIter = std::vec::IntoIter<(String, Vec<Article>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for KeywordArticles {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (keyword, articles) in &self.entries {
            map.serialize_entry(keyword, articles)?;
        }
        map.end()
    }
}

/// Optional publication date window for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Rejects a window whose end precedes its start.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(Error::Config(format!(
                    "date range end {} is before start {}",
                    format_date(end),
                    format_date(start)
                )));
            }
        }
        Ok(())
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(title: &str) -> Article {
        Article {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_article_serializes_all_keys() {
        let value = serde_json::to_value(Article {
            source: ArticleSource::from_name(Some("BBC".to_string())),
            author: Some("Jane".to_string()),
            title: Some("T".to_string()),
            published_at: Some("2024-01-01".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            value,
            json!({
                "source": {"name": "BBC"},
                "author": "Jane",
                "title": "T",
                "description": null,
                "url": null,
                "urlToImage": null,
                "publishedAt": "2024-01-01",
                "content": null
            })
        );
    }

    #[test]
    fn test_source_from_empty_name_is_none() {
        assert_eq!(ArticleSource::from_name(None), None);
        assert_eq!(ArticleSource::from_name(Some(String::new())), None);
        assert_eq!(
            ArticleSource::from_name(Some("cnn".to_string())),
            Some(ArticleSource { name: "cnn".to_string() })
        );
    }

    #[test]
    fn test_keyword_articles_keeps_insertion_order() {
        let mut grouped = KeywordArticles::new();
        grouped.insert("b", vec![article("b1")]);
        grouped.insert("a", vec![article("a1"), article("a2")]);

        assert_eq!(grouped.keywords().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(grouped.get("a").unwrap().len(), 2);
        assert!(grouped.get("c").is_none());

        let titles: Vec<_> = grouped
            .into_articles()
            .into_iter()
            .map(|a| a.title.unwrap())
            .collect();
        assert_eq!(titles, vec!["b1", "a1", "a2"]);
    }

    #[test]
    fn test_keyword_articles_replace_keeps_position() {
        let mut grouped = KeywordArticles::new();
        grouped.insert("x", vec![article("old")]);
        grouped.insert("y", vec![]);
        let previous = grouped.insert("x", vec![article("new")]);

        assert_eq!(previous, Some(vec![article("old")]));
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.keywords().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(grouped.get("x").unwrap()[0].title.as_deref(), Some("new"));
    }

    #[test]
    fn test_keyword_articles_serializes_as_ordered_object() {
        let mut grouped = KeywordArticles::new();
        grouped.insert("zeta", vec![]);
        grouped.insert("alpha", vec![]);
        let text = serde_json::to_string(&grouped).unwrap();
        assert_eq!(text, r#"{"zeta":[],"alpha":[]}"#);
    }

    #[test]
    fn test_date_range_validation() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan5 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        assert!(DateRange::new(Some(jan1), Some(jan5)).validate().is_ok());
        assert!(DateRange::new(Some(jan1), None).validate().is_ok());
        assert!(DateRange::new(Some(jan5), Some(jan1)).validate().is_err());
        assert!(DateRange::default().is_empty());
        assert_eq!(format_date(jan5), "2024-01-05");
    }
}
