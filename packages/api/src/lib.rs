//! ContractRiskAI - bilingual contract clause risk analysis.
//!
//! A clause is wrapped in a fixed instruction prompt, sent to an
//! OpenAI-compatible chat completion endpoint in JSON mode, and the reply is
//! validated into an English and an Arabic [`types::RiskAssessment`].
//!
//! - [`prompt`]: system prompt, few-shot example and industry guidance
//! - [`client`]: the [`client::LlmClient`] seam and its OpenAI implementation
//! - [`observability`]: optional Langfuse tracing around any client
//! - [`analyzer`]: input validation, output validation and batching
//! - [`http`]: the axum router

pub mod analyzer;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod prompt;
pub mod samples;
pub mod types;

pub use analyzer::{ClauseAnalyzer, MAX_BATCH_SIZE, MIN_CLAUSE_CHARS};
pub use client::{LlmClient, LlmRequest, LlmResponse, Message, OpenAiClient, Role};
pub use config::{AnalyzerConfig, LangfuseConfig, ServerConfig};
pub use error::{AnalysisError, ErrorKind, Result};
pub use types::{
    AnalysisMetadata, AnalysisResult, ArabicRiskLevel, BatchItem, BatchResponse, ClauseRequest,
    RiskAssessment, RiskLevel,
};
