use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status} for keyword '{keyword}': {body}")]
    Status {
        provider: String,
        keyword: String,
        status: u16,
        body: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown connector: {0}")]
    UnknownConnector(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_provider_and_keyword() {
        let err = Error::Status {
            provider: "MediaStack".to_string(),
            keyword: "rust".to_string(),
            status: 401,
            body: "invalid_access_key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "MediaStack returned status 401 for keyword 'rust': invalid_access_key"
        );
    }

    #[test]
    fn test_serialization_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
