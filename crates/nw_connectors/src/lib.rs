pub mod cli;
pub mod connectors;
pub mod logging;

pub use cli::{handle_command, ConnectorArgs, ConnectorCommands};
pub use connectors::{get_connector, get_connector_factories, Connector, SourceMetadata};
pub use connectors::mediastack::MediaStackConnector;
pub use connectors::newsdata::NewsDataConnector;

pub mod prelude {
    pub use super::connectors::Connector;
    pub use nw_core::{Article, DateRange, Error, KeywordArticles, Result};
}
