// src/errors.rs
use std::time::Duration;
use thiserror::Error;

/// Shown whenever a request fails without a usable `detail` from the backend.
pub const GENERIC_ERROR: &str = "An error occurred while generating documentation";

/// Rejections raised before any request is issued.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a repository URL")]
    EmptyUrl,

    #[error("Please enter a valid GitHub repository URL")]
    NotGithub,
}

#[derive(Error, Debug)]
pub enum DocError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("Documentation generation timed out after {}", describe_limit(.limit))]
    Timeout { limit: Duration },

    #[error("Unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl DocError {
    /// The text the form displays for this failure.
    pub fn user_message(&self) -> String {
        match self {
            DocError::Validation(e) => e.to_string(),
            DocError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            DocError::Timeout { .. } => self.to_string(),
            _ => GENERIC_ERROR.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DocError::Validation(_))
    }
}

/// "1 second", "30 seconds", or milliseconds when the limit is not whole seconds.
fn describe_limit(limit: &Duration) -> String {
    if limit.subsec_nanos() == 0 && limit.as_secs() > 0 {
        match limit.as_secs() {
            1 => "1 second".to_string(),
            secs => format!("{} seconds", secs),
        }
    } else {
        match limit.as_millis() {
            1 => "1 millisecond".to_string(),
            millis => format!("{} milliseconds", millis),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocError>;
