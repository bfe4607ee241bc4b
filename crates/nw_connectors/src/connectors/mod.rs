use async_trait::async_trait;
use chrono::NaiveDate;
use nw_core::{Article, ConnectorConfig, DateRange, Error, KeywordArticles, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

pub mod mediastack;
pub mod newsdata;

use mediastack::MediaStackConnector;
use newsdata::NewsDataConnector;

/// Query string pairs for one provider request, API key excluded.
pub type QueryParams = Vec<(&'static str, String)>;

pub type BoxedConnector = Box<dyn Connector>;

pub type ConnectorFactory = fn() -> Result<BoxedConnector>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub emoji: &'static str,
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the display metadata of the news provider
    fn source_metadata(&self) -> SourceMetadata;

    /// Returns a list of CLI shorthand names for this connector
    fn cli_names(&self) -> Vec<&str> {
        vec![]
    }

    fn config(&self) -> &ConnectorConfig;

    fn client(&self) -> &Client;

    /// Name of the query parameter carrying the API key
    fn auth_param(&self) -> &'static str;

    /// Top-level JSON key holding the result list
    fn results_key(&self) -> &'static str;

    /// Builds the provider query for an already-trimmed keyword
    fn query_params(&self, keyword: &str, range: &DateRange) -> QueryParams;

    /// Maps one raw provider record into the shared article shape
    fn normalize(&self, item: Value) -> Result<Article>;

    /// Fetches and normalizes a single page of results for one keyword option
    async fn fetch_keyword(&self, keyword: &str, range: &DateRange) -> Result<Vec<Article>> {
        let meta = self.source_metadata();
        let trimmed = keyword.trim();
        let mut params = self.query_params(trimmed, range);
        debug!(
            provider = meta.name,
            keyword = trimmed,
            params = ?params,
            "Requesting articles"
        );
        if let Some(key) = &self.config().api_key {
            params.insert(0, (self.auth_param(), key.clone()));
        }

        let body = utils::get_json(
            self.client(),
            &self.config().base_url,
            &params,
            self.auth_param(),
            meta.name,
            keyword,
        )
        .await?;
        let items = utils::extract_results(body, self.results_key(), meta.name)?;
        items.into_iter().map(|item| self.normalize(item)).collect()
    }

    /// Fetches every keyword option in order. Any failure aborts the whole call.
    async fn fetch_by_options(
        &self,
        options: &[String],
        date_start: Option<NaiveDate>,
        date_end: Option<NaiveDate>,
    ) -> Result<KeywordArticles> {
        let range = DateRange::new(date_start, date_end);
        let mut grouped = KeywordArticles::new();
        for option in options {
            let articles = self.fetch_keyword(option, &range).await?;
            info!(
                "{} {} returned {} articles for '{}'",
                self.source_metadata().emoji,
                self.source_metadata().name,
                articles.len(),
                option.trim()
            );
            grouped.insert(option.clone(), articles);
        }
        Ok(grouped)
    }

    /// Fetches a comma-separated keyword string and flattens the result
    async fn fetch_by_keyword_string(&self, keywords: &str) -> Result<Vec<Article>> {
        let options = split_keywords(keywords);
        let grouped = self.fetch_by_options(&options, None, None).await?;
        Ok(grouped.into_articles())
    }
}

/// Splits strictly on commas. Tokens keep their whitespace; it is trimmed per request.
pub fn split_keywords(keywords: &str) -> Vec<String> {
    keywords.split(',').map(str::to_string).collect()
}

fn mediastack_factory() -> Result<BoxedConnector> {
    Ok(Box::new(MediaStackConnector::new()?))
}

fn newsdata_factory() -> Result<BoxedConnector> {
    Ok(Box::new(NewsDataConnector::new()?))
}

/// Returns a constructor for every available connector, configured from the environment
pub fn get_connector_factories() -> Vec<ConnectorFactory> {
    vec![mediastack_factory as ConnectorFactory, newsdata_factory]
}

/// Finds a connector by one of its CLI names, case-insensitively
pub fn get_connector(name: &str) -> Result<BoxedConnector> {
    let wanted = name.trim().to_lowercase();
    for factory in get_connector_factories() {
        let connector = factory()?;
        if connector.cli_names().iter().any(|n| *n == wanted) {
            return Ok(connector);
        }
    }
    Err(Error::UnknownConnector(name.to_string()))
}

/// Common utilities for connectors
pub(crate) mod utils {
    use super::*;
    use std::time::Duration;
    use tracing::warn;

    pub fn build_client(timeout: Duration) -> Result<Client> {
        Ok(Client::builder().timeout(timeout).build()?)
    }

    pub async fn get_json(
        client: &Client,
        url: &str,
        params: &[(&'static str, String)],
        auth_param: &str,
        provider: &str,
        keyword: &str,
    ) -> Result<Value> {
        let response = client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| redact_auth(e, auth_param))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    let e = redact_auth(e, auth_param);
                    warn!(provider, keyword, error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            return Err(Error::Status {
                provider: provider.to_string(),
                keyword: keyword.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| redact_auth(e, auth_param))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Drops the API key from the request URL that reqwest keeps on its errors.
    pub fn redact_auth(mut err: reqwest::Error, auth_param: &str) -> Error {
        if let Some(url) = err.url_mut() {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(name, _)| *name != auth_param)
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect();
            if kept.is_empty() {
                url.set_query(None);
            } else {
                url.query_pairs_mut().clear().extend_pairs(kept);
            }
        }
        Error::Http(err)
    }

    /// Pulls the result list out of a response body. A missing key yields no
    /// results; a body or key of the wrong shape is an error.
    pub fn extract_results(body: Value, key: &str, provider: &str) -> Result<Vec<Value>> {
        let mut object = match body {
            Value::Object(object) => object,
            other => {
                return Err(Error::UnexpectedResponse(format!(
                    "{} response body is {}, expected an object",
                    provider,
                    json_kind(&other)
                )))
            }
        };

        match object.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(Error::UnexpectedResponse(format!(
                "{} field '{}' is {}, expected an array",
                provider,
                key,
                json_kind(&other)
            ))),
            None => {
                warn!(provider, key, "Response has no result list, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn json_kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}
