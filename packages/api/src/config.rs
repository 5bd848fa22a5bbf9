use std::net::SocketAddr;

use crate::error::{AnalysisError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_LANGFUSE_HOST: &str = "https://cloud.langfuse.com";
pub const DEFAULT_LANGFUSE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Configuration for the model gateway.
///
/// The API key is optional here: a missing key only fails the request that
/// needs it, the server still starts.
#[derive(Clone)]
pub struct AnalyzerConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub temperature: f64,
}

impl AnalyzerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let api_base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        Self {
            api_key,
            api_base_url,
            model,
            temperature,
        }
    }

    /// Create a config builder for testing.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Builder for constructing `AnalyzerConfig` in tests.
pub struct AnalyzerConfigBuilder {
    api_key: Option<String>,
    api_base_url: String,
    model: String,
    temperature: f64,
}

impl AnalyzerConfigBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn build(self) -> AnalyzerConfig {
        AnalyzerConfig {
            api_key: self.api_key,
            api_base_url: self.api_base_url,
            model: self.model,
            temperature: self.temperature,
        }
    }
}

/// Credentials for the optional Langfuse trace sink.
#[derive(Clone)]
pub struct LangfuseConfig {
    pub public_key: String,
    pub secret_key: String,
    pub host: String,
    /// Upper bound on a single ingestion upload.
    pub timeout_secs: u64,
}

impl LangfuseConfig {
    /// Returns `None` unless `LANGFUSE_ENABLED=true` and both keys are present.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        if !is_enabled(lookup("LANGFUSE_ENABLED").as_deref()) {
            return None;
        }

        let public_key = lookup("LANGFUSE_PUBLIC_KEY").unwrap_or_default();
        let secret_key = lookup("LANGFUSE_SECRET_KEY").unwrap_or_default();
        let host = lookup("LANGFUSE_HOST").unwrap_or_else(|| DEFAULT_LANGFUSE_HOST.into());

        let mut config = Self::from_parts(public_key, secret_key, host)?;
        if let Some(secs) = lookup("LANGFUSE_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.timeout_secs = secs;
        }
        Some(config)
    }

    fn from_parts(public_key: String, secret_key: String, host: String) -> Option<Self> {
        let mut missing = Vec::new();
        if public_key.is_empty() {
            missing.push("LANGFUSE_PUBLIC_KEY");
        }
        if secret_key.is_empty() {
            missing.push("LANGFUSE_SECRET_KEY");
        }

        if !missing.is_empty() {
            tracing::warn!(
                "LANGFUSE_ENABLED is set but required vars are missing: {}. Tracing disabled.",
                missing.join(", ")
            );
            return None;
        }

        Some(Self {
            public_key,
            secret_key,
            host: host.trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_LANGFUSE_TIMEOUT_SECS,
        })
    }
}

fn is_enabled(flag: Option<&str>) -> bool {
    flag.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = parse_bind_addr(std::env::var("BIND_ADDR").ok().as_deref())?;
        Ok(Self { bind_addr })
    }
}

fn parse_bind_addr(raw: Option<&str>) -> Result<SocketAddr> {
    let raw = raw.unwrap_or(DEFAULT_BIND_ADDR);
    raw.parse()
        .map_err(|e| AnalysisError::Config(format!("invalid BIND_ADDR '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_builder_defaults() {
        let config = AnalyzerConfig::builder().build();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_base_url, "https://api.openai.com");
        assert!((config.temperature - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AnalyzerConfig::builder().api_key("sk-secret").build();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_langfuse_requires_both_keys() {
        assert!(LangfuseConfig::from_parts(
            "pk".into(),
            String::new(),
            DEFAULT_LANGFUSE_HOST.into()
        )
        .is_none());

        let config = LangfuseConfig::from_parts(
            "pk".into(),
            "sk".into(),
            "https://langfuse.example.com/".into(),
        )
        .expect("complete config");
        assert_eq!(config.host, "https://langfuse.example.com");
    }

    #[test]
    fn test_langfuse_flag_is_case_insensitive_true() {
        for flag in ["true", "TRUE", "True"] {
            assert!(is_enabled(Some(flag)), "{flag} should enable tracing");
        }
        for flag in ["false", "1", "yes", ""] {
            assert!(!is_enabled(Some(flag)), "{flag} should not enable tracing");
        }
        assert!(!is_enabled(None));
    }

    #[test]
    fn test_langfuse_disabled_ignores_keys() {
        let keys = [("LANGFUSE_PUBLIC_KEY", "pk"), ("LANGFUSE_SECRET_KEY", "sk")];
        assert!(LangfuseConfig::from_lookup(lookup_in(&keys)).is_none());

        let disabled = [
            ("LANGFUSE_ENABLED", "1"),
            ("LANGFUSE_PUBLIC_KEY", "pk"),
            ("LANGFUSE_SECRET_KEY", "sk"),
        ];
        assert!(LangfuseConfig::from_lookup(lookup_in(&disabled)).is_none());
    }

    #[test]
    fn test_langfuse_from_lookup_defaults() {
        let config = LangfuseConfig::from_lookup(lookup_in(&[
            ("LANGFUSE_ENABLED", "True"),
            ("LANGFUSE_PUBLIC_KEY", "pk"),
            ("LANGFUSE_SECRET_KEY", "sk"),
        ]))
        .expect("enabled config");

        assert_eq!(config.host, "https://cloud.langfuse.com");
        assert_eq!(config.timeout_secs, DEFAULT_LANGFUSE_TIMEOUT_SECS);
    }

    #[test]
    fn test_langfuse_from_lookup_overrides() {
        let config = LangfuseConfig::from_lookup(lookup_in(&[
            ("LANGFUSE_ENABLED", "TRUE"),
            ("LANGFUSE_PUBLIC_KEY", "pk"),
            ("LANGFUSE_SECRET_KEY", "sk"),
            ("LANGFUSE_HOST", "http://localhost:3000/"),
            ("LANGFUSE_TIMEOUT_SECS", "3"),
        ]))
        .expect("enabled config");

        assert_eq!(config.host, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 3);

        let missing_secret = [("LANGFUSE_ENABLED", "true"), ("LANGFUSE_PUBLIC_KEY", "pk")];
        assert!(LangfuseConfig::from_lookup(lookup_in(&missing_secret)).is_none());
    }

    #[test]
    fn test_bind_addr_parsing() {
        let default = parse_bind_addr(None).expect("default address");
        assert_eq!(default.to_string(), "0.0.0.0:8000");

        let custom = parse_bind_addr(Some("127.0.0.1:9000")).expect("custom address");
        assert_eq!(custom.port(), 9000);

        for raw in ["localhost", "0.0.0.0", "not an address", ":8000"] {
            let err = parse_bind_addr(Some(raw)).expect_err("should be rejected");
            assert!(matches!(err, AnalysisError::Config(_)), "{raw}: {err}");
        }
    }
}
