// src/backend/http.rs

use reqwest::{Client, Response};
use std::time::Instant;

use crate::backend::DocsBackend;
use crate::config::AppConfig;
use crate::errors::{DocError, Result};
use crate::models::{ErrorBody, GenerateRequest, GenerationResult, HealthReport};

/// Talks to the documentation API over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    api_base: String,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` rooted at `api_base`.
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Client::new(), config.api_base.clone())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

/// Turns a non-2xx response into `DocError::Api`, keeping `detail` only when
/// the body is JSON with a non-empty string there.
async fn api_error(resp: Response) -> DocError {
    let status = resp.status().as_u16();
    let detail = match resp.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_detail),
        Err(e) => {
            log::warn!("could not read error body: {}", e);
            None
        }
    };
    DocError::Api { status, detail }
}

impl DocsBackend for HttpBackend {
    async fn generate(&self, repo_url: &str) -> Result<GenerationResult> {
        let url = self.endpoint("/generate-docs");

        log::info!("📡 POST {} for {}", url, repo_url);

        let start = Instant::now();
        let resp = self
            .client
            .post(&url)
            .json(&GenerateRequest { repo_url })
            .send()
            .await?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        log::info!("📥 generate-docs response status: {} ({}ms)", status, latency_ms);

        if !status.is_success() {
            return Err(api_error(resp).await);
        }

        let result: GenerationResult = resp.json().await?;
        if result.doc_url.trim().is_empty() {
            return Err(DocError::UnexpectedResponse(
                "success response without doc_url".to_string(),
            ));
        }

        Ok(result)
    }

    /// Queries `GET /health`.
    async fn health(&self) -> Result<HealthReport> {
        let url = self.endpoint("/health");
        log::debug!("📡 GET {}", url);

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(resp.json().await?)
    }
}
