pub mod config;
pub mod error;
pub mod types;

pub use config::ConnectorConfig;
pub use error::{Error, Result};
pub use types::{Article, ArticleSource, DateRange, KeywordArticles};
