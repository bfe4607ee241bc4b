use async_trait::async_trait;
use nw_core::types::format_date;
use nw_core::{Article, ArticleSource, ConnectorConfig, DateRange, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::connectors::{utils, Connector, QueryParams, SourceMetadata};

pub const API_KEY_VAR: &str = "NEWSDATA_API_KEY";
pub const BASE_URL_VAR: &str = "NEWSDATA_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://newsdata.io/api/1/news";

#[derive(Debug, Clone)]
pub struct NewsDataConnector {
    config: ConnectorConfig,
    client: Client,
}

impl NewsDataConnector {
    pub fn new() -> Result<Self> {
        Self::with_config(ConnectorConfig::from_env(API_KEY_VAR, BASE_URL_VAR, DEFAULT_BASE_URL)?)
    }

    pub fn with_config(config: ConnectorConfig) -> Result<Self> {
        let client = utils::build_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

/// `creator` comes back either as a list of names or a single name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Creator {
    Many(Vec<Option<String>>),
    One(String),
}

impl Creator {
    fn into_author(self) -> Option<String> {
        match self {
            Creator::Many(names) => names.into_iter().next().flatten(),
            Creator::One(name) => Some(name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsDataRecord {
    source_id: Option<String>,
    creator: Option<Creator>,
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    image_url: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    content: Option<String>,
}

pub fn normalize_record(item: Value) -> Result<Article> {
    let record: NewsDataRecord = serde_json::from_value(item)?;
    Ok(Article {
        source: ArticleSource::from_name(record.source_id),
        author: record.creator.and_then(Creator::into_author),
        title: record.title,
        description: record.description,
        url: record.link,
        url_to_image: record.image_url,
        published_at: record.pub_date,
        content: record.content,
    })
}

#[async_trait]
impl Connector for NewsDataConnector {
    fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "NewsData",
            emoji: "🗞️",
        }
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["newsdata", "newsdata.io"]
    }

    fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    fn client(&self) -> &Client {
        &self.client
    }

    fn auth_param(&self) -> &'static str {
        "apikey"
    }

    fn results_key(&self) -> &'static str {
        "results"
    }

    fn query_params(&self, keyword: &str, range: &DateRange) -> QueryParams {
        let mut params = vec![
            ("q", keyword.to_string()),
            ("language", self.config.language.clone()),
            ("country", self.config.country.clone()),
            ("size", self.config.page_size.to_string()),
        ];
        if let Some(start) = range.start {
            params.push(("from_date", format_date(start)));
        }
        if let Some(end) = range.end {
            params.push(("to_date", format_date(end)));
        }
        params
    }

    fn normalize(&self, item: Value) -> Result<Article> {
        normalize_record(item)
    }
}
