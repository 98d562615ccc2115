use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Request to {url} failed with status {status}")]
    RequestError { url: String, status: u16 },

    #[error("Lookup error: {0}")]
    LookupError(String),

    #[error("Failed to parse response data, error: {0}")]
    ParseError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}
