use thiserror::Error;

/// Failures coming back from something outside the terminal
/// (market-data endpoint, static asset fetches).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("service error: {0}")]
    Service(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt value in slot '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid terminal config: {0}")]
    Parse(#[from] serde_json::Error),
}
