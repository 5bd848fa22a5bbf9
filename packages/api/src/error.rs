use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("model returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid response format from AI model: {0}")]
    InvalidShape(String),

    #[error("model declined the clause: {0}")]
    ModelRefused(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("LLM API request failed: {0}")]
    LlmApiRequest(#[from] reqwest::Error),

    #[error("LLM API error (status {status}): {message}")]
    LlmApiError { status: u16, message: String },

    #[error("failed to parse LLM response: {0}")]
    LlmResponseParse(String),

    #[error("LLM returned empty response")]
    LlmEmptyResponse,
}

/// The four failure classes reported to API consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    InvalidJson,
    InvalidShape,
    InternalError,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidJson(_) => ErrorKind::InvalidJson,
            Self::InvalidShape(_) | Self::ModelRefused(_) => ErrorKind::InvalidShape,
            Self::Config(_)
            | Self::LlmApiRequest(_)
            | Self::LlmApiError { .. }
            | Self::LlmResponseParse(_)
            | Self::LlmEmptyResponse => ErrorKind::InternalError,
        }
    }

    /// Message shown to API consumers. Input errors are shown as-is, anything
    /// past validation is reported as a failed analysis.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::InvalidInput => self.to_string(),
            _ => format!("Analysis failed: {self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
