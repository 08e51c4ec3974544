use thiserror::Error;

/// Failure talking to the text-generation service.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx status; `body` is the server's diagnostic text.
    #[error("{status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TranslateError {
    /// Text shown to the user for this failure.
    pub fn diagnostic(&self) -> String {
        match self {
            TranslateError::Status { body, .. } if !body.trim().is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Reason a statement was refused before reaching the store.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("could not parse statement: {0}")]
    Parse(#[from] sqlparser::parser::ParserError),

    #[error("no statement found")]
    Empty,

    #[error("expected a single statement, found {0}")]
    MultipleStatements(usize),

    #[error("only read-only SELECT queries are allowed, got {0}")]
    NotReadOnly(String),
}

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("statement rejected: {0}")]
    Rejected(#[from] GuardError),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing column '{0}'")]
    MissingColumn(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("model identifier must not be empty")]
    EmptyModel,

    #[error("endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
}
