// src/models.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /generate-docs`.
#[derive(Serialize, Debug)]
pub struct GenerateRequest<'a> {
    pub repo_url: &'a str,
}

/// What the backend returns once documentation is ready.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Human-readable success text, e.g. "Documentation retrieved from cache".
    pub message: String,
    /// Path of the generated docs, relative to the backend origin.
    pub doc_url: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub task_id: Option<String>,
}

fn default_status() -> String {
    "success".to_string()
}

impl GenerationResult {
    pub fn new(message: impl Into<String>, doc_url: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            doc_url: doc_url.into(),
            status: default_status(),
            task_id: None,
        }
    }
}

/// Error body of a non-2xx response. `detail` is left untyped because some
/// failures (request validation in particular) send a list instead of a string.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The detail message, if it is a non-empty string.
    pub fn into_detail(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub services: BTreeMap<String, String>,
}
