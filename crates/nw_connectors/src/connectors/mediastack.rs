use async_trait::async_trait;
use nw_core::types::format_date;
use nw_core::{Article, ArticleSource, ConnectorConfig, DateRange, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::connectors::{utils, Connector, QueryParams, SourceMetadata};

pub const API_KEY_VAR: &str = "MEDIASTACK_API_KEY";
pub const BASE_URL_VAR: &str = "MEDIASTACK_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://api.mediastack.com/v1/news";

#[derive(Debug, Clone)]
pub struct MediaStackConnector {
    config: ConnectorConfig,
    client: Client,
}

impl MediaStackConnector {
    pub fn new() -> Result<Self> {
        Self::with_config(ConnectorConfig::from_env(API_KEY_VAR, BASE_URL_VAR, DEFAULT_BASE_URL)?)
    }

    pub fn with_config(config: ConnectorConfig) -> Result<Self> {
        let client = utils::build_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

#[derive(Debug, Deserialize)]
struct MediaStackRecord {
    source: Option<String>,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    image: Option<String>,
    published_at: Option<String>,
}

/// MediaStack never returns article bodies, so `content` is always empty.
pub fn normalize_record(item: Value) -> Result<Article> {
    let record: MediaStackRecord = serde_json::from_value(item)?;
    Ok(Article {
        source: ArticleSource::from_name(record.source),
        author: record.author,
        title: record.title,
        description: record.description,
        url: record.url,
        url_to_image: record.image,
        published_at: record.published_at,
        content: None,
    })
}

#[async_trait]
impl Connector for MediaStackConnector {
    fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "MediaStack",
            emoji: "📚",
        }
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["mediastack"]
    }

    fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    fn client(&self) -> &Client {
        &self.client
    }

    fn auth_param(&self) -> &'static str {
        "access_key"
    }

    fn results_key(&self) -> &'static str {
        "data"
    }

    fn query_params(&self, keyword: &str, range: &DateRange) -> QueryParams {
        let mut params = vec![
            ("keywords", keyword.to_string()),
            ("languages", self.config.language.clone()),
            ("countries", self.config.country.clone()),
            ("sort", "published_desc".to_string()),
            ("limit", self.config.page_size.to_string()),
        ];
        // An end date is only meaningful together with a start date here.
        match (range.start, range.end) {
            (Some(start), Some(end)) => {
                params.push(("date", format!("{},{}", format_date(start), format_date(end))))
            }
            (Some(start), None) => params.push(("date", format_date(start))),
            _ => {}
        }
        params
    }

    fn normalize(&self, item: Value) -> Result<Article> {
        normalize_record(item)
    }
}
