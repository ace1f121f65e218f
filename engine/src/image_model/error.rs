use std::error::Error as StdError;

use serde::Deserialize;
use thiserror::Error;

/// Everything that can go wrong while asking the service for an image
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The service answered with a non-2xx status
    #[error("Failed to fetch image: {status}")]
    Service { status: u16, body: String },

    /// No response was obtained, or the request could not be encoded
    #[error("Error fetching image: {reason}")]
    Transport { reason: String },
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    name: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

impl GenerationError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Human readable detail for logs. Stability answers errors with
    /// `{"name": .., "errors": [..]}`, other bodies are returned as they are.
    pub fn detail(&self) -> String {
        match self {
            Self::Service { body, .. } => match serde_json::from_str::<ServiceErrorBody>(body) {
                Ok(parsed) if !parsed.errors.is_empty() => match parsed.name {
                    Some(name) => format!("{name}: {}", parsed.errors.join("; ")),
                    None => parsed.errors.join("; "),
                },
                _ => body.clone(),
            },
            Self::Transport { reason } => reason.clone(),
        }
    }
}

/// Joins an error with all of its sources, reqwest hides the interesting part
/// (e.g. "connection refused") in there.
fn source_chain(err: &dyn StdError) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        reason.push_str(": ");
        reason.push_str(&s.to_string());
        source = s.source();
    }
    reason
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(source_chain(&err))
    }
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::transport(source_chain(&err))
    }
}
