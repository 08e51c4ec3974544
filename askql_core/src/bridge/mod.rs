use crate::config::AppConfig;
use crate::error::TranslateError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod prompt;

pub use prompt::build_prompt;

/// Anything that can turn a prompt into generated text.
pub trait Translate {
    fn translate(&self, prompt: &str) -> Result<String, TranslateError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Blocking client for an Ollama-style `/api/generate` endpoint.
///
/// One request per call: no retries, no caching. The only timeout is the one
/// configured in [`AppConfig::request_timeout`], if any.
pub struct NLTranslator {
    client: Client,
    endpoint: String,
    model: String,
}

impl NLTranslator {
    pub fn new(config: &AppConfig) -> Result<Self, TranslateError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| TranslateError::Transport {
            endpoint: config.endpoint.clone(),
            source,
        })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn transport_error(&self, source: reqwest::Error) -> TranslateError {
        TranslateError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}

impl Translate for NLTranslator {
    fn translate(&self, prompt: &str) -> Result<String, TranslateError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        debug!(endpoint = %self.endpoint, model = %self.model, "sending generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!(%status, "generation request failed");
            return Err(TranslateError::Status { status, body });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        debug!(generated = %parsed.response, "received generation");
        Ok(parsed.response.trim().to_string())
    }
}
