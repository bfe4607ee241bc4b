use chrono::NaiveDate;
use clap::{Args, Subcommand};
use nw_core::{DateRange, Result};
use serde_json::Value;
use tracing::info;

use crate::connectors::{get_connector, get_connector_factories, split_keywords, Connector};

#[derive(Args, Debug, Clone)]
pub struct ConnectorArgs {
    #[command(subcommand)]
    pub command: ConnectorCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConnectorCommands {
    /// Fetch articles for comma-separated keywords from one provider
    Fetch {
        /// The provider to query (mediastack, newsdata)
        provider: String,
        /// Comma-separated keywords, e.g. "inflation,interest rates"
        keywords: String,
        /// Earliest publication date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest publication date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Print results grouped by keyword instead of a flat list
        #[arg(long)]
        grouped: bool,
    },
    /// List available connectors
    List,
}

pub async fn handle_command(args: ConnectorArgs) -> Result<()> {
    match args.command {
        ConnectorCommands::Fetch {
            provider,
            keywords,
            from,
            to,
            grouped,
        } => {
            let range = DateRange::new(from, to);
            range.validate()?;
            let connector = get_connector(&provider)?;
            let output = fetch(connector.as_ref(), &keywords, range, grouped).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        ConnectorCommands::List => {
            for line in list_lines()? {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Runs one fetch and renders it as JSON: a flat array, or an object keyed by
/// keyword when grouping was asked for. A date window goes through the
/// per-option fetch either way.
pub async fn fetch(connector: &dyn Connector, keywords: &str, range: DateRange, grouped: bool) -> Result<Value> {
    let meta = connector.source_metadata();
    if range.is_empty() && !grouped {
        info!("{} Fetching '{}' from {}", meta.emoji, keywords, meta.name);
        let articles = connector.fetch_by_keyword_string(keywords).await?;
        info!("Found {} articles", articles.len());
        return Ok(serde_json::to_value(articles)?);
    }

    let options = split_keywords(keywords);
    info!(
        "{} Fetching {} keyword(s) from {} ({:?})",
        meta.emoji,
        options.len(),
        meta.name,
        range
    );
    let results = connector.fetch_by_options(&options, range.start, range.end).await?;
    if grouped {
        Ok(serde_json::to_value(&results)?)
    } else {
        Ok(serde_json::to_value(results.into_articles())?)
    }
}

fn list_lines() -> Result<Vec<String>> {
    let mut lines = vec!["Available connectors:".to_string()];
    for factory in get_connector_factories() {
        let connector = factory()?;
        let meta = connector.source_metadata();
        let key_state = if connector.config().has_api_key() {
            "api key set"
        } else {
            "api key missing"
        };
        lines.push(format!(
            "  {} {} [{}] ({})",
            meta.emoji,
            connector.cli_names().first().copied().unwrap_or(meta.name),
            meta.name,
            key_state
        ));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_lines() {
        let lines = list_lines().unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("mediastack"));
        assert!(lines[2].contains("newsdata"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_reversed_range() {
        let args = ConnectorArgs {
            command: ConnectorCommands::Fetch {
                provider: "mediastack".to_string(),
                keywords: "rust".to_string(),
                from: NaiveDate::from_ymd_opt(2024, 2, 1),
                to: NaiveDate::from_ymd_opt(2024, 1, 1),
                grouped: false,
            },
        };
        let result = handle_command(args).await;
        assert!(matches!(result, Err(nw_core::Error::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_unknown_provider() {
        let args = ConnectorArgs {
            command: ConnectorCommands::Fetch {
                provider: "gnews".to_string(),
                keywords: "rust".to_string(),
                from: None,
                to: None,
                grouped: false,
            },
        };
        let result = handle_command(args).await;
        assert!(matches!(result, Err(nw_core::Error::UnknownConnector(_))));
    }
}
