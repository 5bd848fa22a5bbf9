//! Best-effort LLM tracing to a Langfuse-compatible ingestion API.
//!
//! [`TracedClient`] wraps any [`LlmClient`] and ships one trace per completion
//! in a background task. Upload failures are logged and dropped; the wrapped
//! call's result is returned untouched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use crate::config::LangfuseConfig;
use crate::error::{AnalysisError, Result};

const GENERATION_NAME: &str = "clause-analysis";

/// NOTE: no `Debug` derive, the secret key lives here.
pub struct LangfuseTracer {
    http: reqwest::Client,
    config: LangfuseConfig,
}

impl LangfuseTracer {
    pub fn new(config: LangfuseConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AnalysisError::LlmApiRequest)?;
        Ok(Self { http, config })
    }

    async fn send(&self, batch: Value) -> Result<()> {
        let url = format!("{}/api/public/ingestion", self.config.host);
        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.config.public_key, Some(&self.config.secret_key))
            .json(&batch)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::LlmApiError { status, message });
        }
        Ok(())
    }
}

/// An [`LlmClient`] decorator that records every completion.
pub struct TracedClient<C> {
    inner: C,
    tracer: Arc<LangfuseTracer>,
}

impl<C: LlmClient> TracedClient<C> {
    pub fn new(inner: C, tracer: LangfuseTracer) -> Self {
        Self {
            inner,
            tracer: Arc::new(tracer),
        }
    }
}

#[async_trait]
impl<C: LlmClient> LlmClient for TracedClient<C> {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let start = Utc::now();
        let result = self.inner.complete(request).await;
        let end = Utc::now();

        let batch = generation_batch(self.inner.model(), request, &result, start, end);
        let tracer = Arc::clone(&self.tracer);
        tokio::spawn(async move {
            match tracer.send(batch).await {
                Ok(()) => debug!("trace uploaded"),
                Err(e) => warn!(error = %e, "failed to upload trace"),
            }
        });

        result
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}

fn generation_batch(
    model: &str,
    request: &LlmRequest,
    result: &Result<LlmResponse>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Value {
    let trace_id = Uuid::new_v4().to_string();

    let mut input = vec![json!({ "role": "system", "content": request.system })];
    input.extend(
        request
            .messages
            .iter()
            .map(|m| json!({ "role": m.role, "content": m.content })),
    );

    let mut generation = json!({
        "id": Uuid::new_v4().to_string(),
        "traceId": trace_id,
        "name": GENERATION_NAME,
        "model": model,
        "modelParameters": { "temperature": request.temperature },
        "input": input,
        "startTime": start.to_rfc3339(),
        "endTime": end.to_rfc3339(),
    });

    match result {
        Ok(response) => {
            generation["output"] = json!(response.content);
            generation["usage"] = json!({
                "input": response.input_tokens,
                "output": response.output_tokens,
            });
            generation["level"] = json!("DEFAULT");
        }
        Err(e) => {
            generation["level"] = json!("ERROR");
            generation["statusMessage"] = json!(e.to_string());
        }
    }

    json!({
        "batch": [
            {
                "id": Uuid::new_v4().to_string(),
                "timestamp": start.to_rfc3339(),
                "type": "trace-create",
                "body": { "id": trace_id, "name": GENERATION_NAME },
            },
            {
                "id": Uuid::new_v4().to_string(),
                "timestamp": end.to_rfc3339(),
                "type": "generation-create",
                "body": generation,
            }
        ]
    })
}
