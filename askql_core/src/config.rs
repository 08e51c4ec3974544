//! Process-wide settings, built once at startup and passed down explicitly.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATABASE: &str = "students.db";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "llama3";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file holding the student table.
    pub database_path: PathBuf,
    /// CSV export to (re)load into the store before the session starts.
    pub dataset_path: Option<PathBuf>,
    /// Text-generation endpoint (Ollama `/api/generate` compatible).
    pub endpoint: String,
    pub model: String,
    /// `None` leaves the HTTP client's defaults in place.
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE),
            dataset_path: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        Ok(())
    }
}
