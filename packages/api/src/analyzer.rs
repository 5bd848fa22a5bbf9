use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::{LlmClient, LlmRequest, Message, Role};
use crate::error::{AnalysisError, Result};
use crate::prompt;
use crate::types::{
    AnalysisMetadata, AnalysisResult, ArabicRiskLevel, BatchItem, BatchResponse, ClauseRequest,
    RiskAssessment, RiskLevel,
};

/// Minimum clause length in characters, measured after trimming.
pub const MIN_CLAUSE_CHARS: usize = 10;

/// Maximum number of clauses accepted by a single batch request.
pub const MAX_BATCH_SIZE: usize = 10;

/// Number of clause characters echoed back for a failed batch item.
const CLAUSE_ECHO_CHARS: usize = 50;

const SUMMARY_WORD_LIMIT: usize = 40;
const REASON_WORD_LIMIT: usize = 25;
const REWRITE_WORD_LIMIT: usize = 40;

/// Shape the model is instructed to produce: the English assessment inline
/// plus an `arabic` sub-object with the same four fields.
#[derive(Deserialize)]
struct ModelOutput {
    #[serde(flatten)]
    english: RiskAssessment<RiskLevel>,
    arabic: RiskAssessment<ArabicRiskLevel>,
}

/// Runs clauses through compose → complete → validate.
///
/// Holds no per-request state; one instance is shared by all requests.
pub struct ClauseAnalyzer {
    client: Arc<dyn LlmClient>,
    temperature: f64,
}

impl ClauseAnalyzer {
    pub fn new(client: Arc<dyn LlmClient>, temperature: f64) -> Self {
        Self {
            client,
            temperature,
        }
    }

    /// Analyze a single clause.
    ///
    /// Input validation happens before the model is contacted, so an
    /// [`AnalysisError::InvalidInput`] never costs an API call.
    pub async fn analyze(&self, request: &ClauseRequest) -> Result<AnalysisResult> {
        validate_clause(&request.clause)?;

        let clause_length = request.clause.chars().count();
        info!(
            clause_length,
            industry = ?request.industry(),
            has_context = request.context().is_some(),
            "analyzing clause"
        );

        let llm_request = LlmRequest {
            system: prompt::build_system_prompt().to_string(),
            messages: vec![Message {
                role: Role::User,
                content: prompt::build_analysis_prompt(request),
            }],
            temperature: self.temperature,
            json_output: true,
        };

        let started = Instant::now();
        let response = self.client.complete(&llm_request).await?;
        let elapsed = started.elapsed();
        debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "model responded"
        );

        let (english, arabic) = parse_model_output(&response.content).inspect_err(|e| {
            warn!(kind = ?e.kind(), error = %e, "model output rejected");
        })?;

        for violation in word_limit_violations("english", &english)
            .into_iter()
            .chain(word_limit_violations("arabic", &arabic))
        {
            warn!(violation = %violation, "model exceeded requested length");
        }

        if RiskLevel::from(arabic.risk) != english.risk {
            warn!(
                english = ?english.risk,
                arabic = ?arabic.risk,
                "risk levels disagree between languages"
            );
        }

        Ok(AnalysisResult {
            english,
            arabic,
            metadata: AnalysisMetadata {
                processing_time: format!("{:.2}s", elapsed.as_secs_f64()),
                model: self.client.model().to_string(),
                timestamp: Utc::now(),
                clause_length,
                has_context: request.context().is_some(),
                industry: request.industry.clone(),
            },
        })
    }

    /// Analyze up to [`MAX_BATCH_SIZE`] clauses one after another.
    ///
    /// Item failures are recorded in place and never stop later items. Only
    /// an oversized batch fails as a whole, before any item runs.
    pub async fn analyze_batch(&self, requests: &[ClauseRequest]) -> Result<BatchResponse> {
        if requests.len() > MAX_BATCH_SIZE {
            return Err(AnalysisError::InvalidInput(format!(
                "Maximum {MAX_BATCH_SIZE} clauses per batch request"
            )));
        }

        let mut results = Vec::with_capacity(requests.len());
        for (index, request) in requests.iter().enumerate() {
            match self.analyze(request).await {
                Ok(result) => results.push(BatchItem::Success {
                    result: Box::new(result),
                }),
                Err(e) => {
                    warn!(index, kind = ?e.kind(), error = %e, "batch item failed");
                    results.push(BatchItem::Error {
                        error: e.user_message(),
                        clause: clause_echo(&request.clause),
                    });
                }
            }
        }

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        info!(
            total = requests.len(),
            succeeded,
            failed = requests.len() - succeeded,
            "batch finished"
        );

        Ok(BatchResponse {
            total: requests.len(),
            results,
        })
    }
}

/// Reject clauses that are empty or too short once surrounding whitespace is
/// removed.
pub fn validate_clause(clause: &str) -> Result<()> {
    if clause.trim().chars().count() < MIN_CLAUSE_CHARS {
        return Err(AnalysisError::InvalidInput(format!(
            "Please provide a valid contract clause (at least {MIN_CLAUSE_CHARS} characters)"
        )));
    }
    Ok(())
}

/// Parse the raw model reply into its English and Arabic halves.
///
/// Both the top-level `summary` and `arabic` keys must be present, and both
/// halves must carry all four fields with a risk label from their language.
pub fn parse_model_output(
    raw: &str,
) -> Result<(RiskAssessment<RiskLevel>, RiskAssessment<ArabicRiskLevel>)> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|e| AnalysisError::InvalidJson(e.to_string()))?;

    let Some(object) = value.as_object() else {
        return Err(AnalysisError::InvalidShape(
            "expected a JSON object".into(),
        ));
    };

    let missing: Vec<&str> = ["summary", "arabic"]
        .into_iter()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        if let Some(message) = object.get("error").and_then(Value::as_str) {
            return Err(AnalysisError::ModelRefused(message.to_string()));
        }
        return Err(AnalysisError::InvalidShape(format!(
            "missing required keys: {}",
            missing.join(", ")
        )));
    }

    let output: ModelOutput =
        serde_json::from_value(value).map_err(|e| AnalysisError::InvalidShape(e.to_string()))?;

    Ok((output.english, output.arabic))
}

/// Fields of `assessment` longer than the prompt asks for.
pub fn word_limit_violations<R>(language: &str, assessment: &RiskAssessment<R>) -> Vec<String> {
    [
        ("summary", &assessment.summary, SUMMARY_WORD_LIMIT),
        ("reason", &assessment.reason, REASON_WORD_LIMIT),
        ("rewrite", &assessment.rewrite, REWRITE_WORD_LIMIT),
    ]
    .into_iter()
    .filter_map(|(field, text, limit)| {
        let words = text.split_whitespace().count();
        (words > limit).then(|| format!("{language}.{field}: {words} words (limit {limit})"))
    })
    .collect()
}

fn clause_echo(clause: &str) -> String {
    let mut echo: String = clause.chars().take(CLAUSE_ECHO_CHARS).collect();
    echo.push_str("...");
    echo
}
