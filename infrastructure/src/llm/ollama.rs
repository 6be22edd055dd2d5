//! Ollama adapters for local models.
//!
//! [`OllamaGenerator`] implements [`TextGenerator`] over `POST /api/generate`
//! with streaming disabled; [`OllamaEmbedder`] implements [`Embedder`] over
//! `POST /api/embeddings`.

use async_trait::async_trait;
use roundtable_application::ports::llm_gateway::{Embedder, GatewayError, TextGenerator};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Shared HTTP plumbing of both adapters
#[derive(Debug, Clone)]
struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OllamaClient {
    fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        model: &str,
        request: &Req,
    ) -> Result<Resp, GatewayError> {
        let url = self.url(path);
        trace!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                GatewayError::ModelNotAvailable(model.to_string())
            } else {
                GatewayError::RequestFailed(format!("HTTP {}: {}", status, error_text))
            });
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(e.to_string())
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    eval_count: Option<u32>,
}

/// Text generation through a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    http: OllamaClient,
    model: String,
}

impl OllamaGenerator {
    pub fn new(
        endpoint: &str,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            http: OllamaClient::new(endpoint, timeout)?,
            model: model.into(),
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let response: GenerateResponse = self
            .http
            .post("/api/generate", &self.model, &request)
            .await?;
        debug!(
            "{} generated {} bytes ({} tokens)",
            self.model,
            response.response.len(),
            response.eval_count.unwrap_or(0)
        );
        Ok(response.response)
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Embeddings through a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    http: OllamaClient,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(
        endpoint: &str,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            http: OllamaClient::new(endpoint, timeout)?,
            model: model.into(),
        })
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };
        let response: EmbeddingResponse = self
            .http
            .post("/api/embeddings", &self.model, &request)
            .await?;
        if response.embedding.is_empty() {
            return Err(GatewayError::MalformedResponse(
                "empty embedding".to_string(),
            ));
        }
        Ok(response.embedding)
    }
}
