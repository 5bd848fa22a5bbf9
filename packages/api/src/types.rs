use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single clause submitted for analysis.
///
/// `clause` defaults to empty so a body without it is rejected by input
/// validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClauseRequest {
    #[serde(default)]
    pub clause: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

impl ClauseRequest {
    pub fn new(clause: impl Into<String>) -> Self {
        Self {
            clause: clause.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Context text, if any was supplied. Empty strings count as absent.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.is_empty())
    }

    /// Industry tag, if any was supplied. Empty strings count as absent.
    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref().filter(|i| !i.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArabicRiskLevel {
    #[serde(rename = "منخفض")]
    Low,
    #[serde(rename = "متوسط")]
    Medium,
    #[serde(rename = "مرتفع")]
    High,
}

impl From<ArabicRiskLevel> for RiskLevel {
    fn from(level: ArabicRiskLevel) -> Self {
        match level {
            ArabicRiskLevel::Low => RiskLevel::Low,
            ArabicRiskLevel::Medium => RiskLevel::Medium,
            ArabicRiskLevel::High => RiskLevel::High,
        }
    }
}

/// One language half of an analysis. `R` is the label set of that language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment<R> {
    pub summary: String,
    pub risk: R,
    pub reason: String,
    pub rewrite: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub processing_time: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
    pub clause_length: usize,
    pub has_context: bool,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub english: RiskAssessment<RiskLevel>,
    pub arabic: RiskAssessment<ArabicRiskLevel>,
    pub metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchItem {
    Success { result: Box<AnalysisResult> },
    Error { error: String, clause: String },
}

impl BatchItem {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItem>,
    pub total: usize,
}
