//! Stub completion backends and request helpers shared by handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use crate::llm_client::{CompletionBackend, LlmError};
use crate::routes::build_router;
use crate::state::AppState;

/// Always answers with the same text.
pub struct CannedBackend(String);

impl CannedBackend {
    pub fn new(answer: &str) -> Self {
        Self(answer.to_string())
    }
}

#[async_trait]
impl CompletionBackend for CannedBackend {
    async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        Ok(self.0.clone())
    }
}

/// Answers with the prompt it was given.
pub struct EchoBackend;

#[async_trait]
impl CompletionBackend for EchoBackend {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        Ok(prompt.to_string())
    }
}

/// Fails like a provider that keeps returning 503.
pub struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "Service Unavailable".to_string(),
        })
    }
}

async fn send(backend: impl CompletionBackend + 'static, request: Request<Body>) -> (StatusCode, Value) {
    let router = build_router(AppState {
        llm: Arc::new(backend),
    });
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn get(backend: impl CompletionBackend + 'static, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(backend, request).await
}

pub async fn post_json(
    backend: impl CompletionBackend + 'static,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(backend, request).await
}
