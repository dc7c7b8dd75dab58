// src/backend/mod.rs

use crate::errors::Result;
use crate::models::{GenerationResult, HealthReport};

pub mod http;

pub use http::HttpBackend;

/// A documentation-generation service.
///
/// The form only ever needs one call: hand over a repository URL and get back
/// where the generated documentation lives. Implementations report non-2xx
/// answers as `DocError::Api`, carrying the backend's `detail` when it sent one.
pub trait DocsBackend: Send + Sync {
    /// Requests documentation for `repo_url`, which has already passed
    /// client-side validation and been trimmed.
    fn generate(
        &self,
        repo_url: &str,
    ) -> impl std::future::Future<Output = Result<GenerationResult>> + Send;

    /// Reports whether the service and its parts are up.
    fn health(&self) -> impl std::future::Future<Output = Result<HealthReport>> + Send;
}
