//! Advisory text generation from computed metrics.
//!
//! The advisory service sits outside the core: it receives a prompt built from
//! a `MetricsResult` and returns free text. Any failure (missing credential,
//! non-2xx response, timeout) is reported as `Error::UpstreamAdvisory` and
//! leaves the metrics untouched.
//!
//! # Backends
//!
//! - `openai_compatible`: any `/v1/chat/completions` server (NVIDIA, OpenAI, vLLM, ...)
//! - `anthropic`: the Messages API
//! - `rule_based`: fixed-wording advice from the metrics themselves, offline
//! - `mock`: canned output for tests

mod anthropic;
mod mock;
mod openai_compatible;
mod rule_based;

pub use anthropic::AnthropicBackend;
pub use mock::MockBackend;
pub use openai_compatible::OpenAiCompatibleBackend;
pub use rule_based::RuleBasedBackend;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use ledgerlens_core::{Error, Result};

use crate::metrics::MetricsResult;

pub const DISCLAIMER: &str =
    "This is educational financial guidance, not professional financial advice.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    OpenaiCompatible,
    Anthropic,
    RuleBased,
    Mock,
}

impl Provider {
    /// Model used when the settings leave it out. Empty for local backends.
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenaiCompatible => "nemotron-mini-4b-instruct",
            Provider::Anthropic => "claude-3-5-haiku-latest",
            Provider::RuleBased | Provider::Mock => "",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenaiCompatible => "https://integrate.api.nvidia.com",
            Provider::Anthropic => "https://api.anthropic.com",
            Provider::RuleBased | Provider::Mock => "",
        }
    }

    pub fn default_api_key_env(self) -> &'static str {
        match self {
            Provider::OpenaiCompatible => "NVIDIA_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::RuleBased | Provider::Mock => "",
        }
    }
}

/// Advisory backend settings. The credential itself is never stored, only the
/// name of the environment variable that holds it.
///
/// `model`, `base_url` and `api_key_env` fall back to the provider's own
/// defaults when left out, so `provider = "anthropic"` alone is a working
/// Anthropic setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorySettings {
    pub provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for AdvisorySettings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenaiCompatible,
            model: None,
            base_url: None,
            api_key_env: None,
            temperature: 0.3,
            max_tokens: 400,
            timeout_secs: 30,
        }
    }
}

impl AdvisorySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }

    fn api_key(&self) -> Result<String> {
        let var = self.api_key_env();
        std::env::var(var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::UpstreamAdvisory(format!("{var} is missing. AI advisory cannot run.")))
    }
}

/// Prompt interpolating the rounded metrics, the top spending category and
/// whether anything looked anomalous.
pub fn build_prompt(m: &MetricsResult) -> String {
    let top = m
        .top_category()
        .map(|c| format!("{} (${:.2})", c.category, c.total))
        .unwrap_or_else(|| "none".to_string());
    let anomalies = if m.has_anomalies() {
        format!("yes ({} unusual transactions)", m.anomalies.len())
    } else {
        "no".to_string()
    };

    format!(
        "You are a financial analysis assistant.\n\
         \n\
         Using the following computed metrics, generate clear, practical financial insights.\n\
         Reference numbers explicitly. Avoid generic advice.\n\
         \n\
         Metrics:\n\
         - Total Income: ${income}\n\
         - Total Expenses: ${expenses}\n\
         - Net Savings: ${net}\n\
         - Savings Rate: {rate}%\n\
         - Top Spending Category: {top}\n\
         - Anomalous Transactions: {anomalies}\n\
         \n\
         Provide:\n\
         1. A short summary\n\
         2. Key observations\n\
         3. One or two actionable suggestions\n\
         \n\
         End with:\n\
         \"{DISCLAIMER}\"\n",
        income = m.total_income,
        expenses = m.total_expenses,
        net = m.net_savings,
        rate = m.savings_rate,
    )
}

/// Concrete advisory client with compile-time dispatch over the backends
#[derive(Clone)]
pub enum AdvisoryClient {
    OpenaiCompatible(OpenAiCompatibleBackend),
    Anthropic(AnthropicBackend),
    RuleBased(RuleBasedBackend),
    Mock(MockBackend),
}

impl AdvisoryClient {
    /// Build the configured backend. Fails early when the credential is missing.
    pub fn from_settings(settings: &AdvisorySettings) -> Result<Self> {
        match settings.provider {
            Provider::OpenaiCompatible => Ok(AdvisoryClient::OpenaiCompatible(
                OpenAiCompatibleBackend::new(settings, settings.api_key()?)?,
            )),
            Provider::Anthropic => Ok(AdvisoryClient::Anthropic(AnthropicBackend::new(
                settings,
                settings.api_key()?,
            )?)),
            Provider::RuleBased => Ok(AdvisoryClient::RuleBased(RuleBasedBackend::new())),
            Provider::Mock => Ok(AdvisoryClient::Mock(MockBackend::new())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdvisoryClient::OpenaiCompatible(_) => "openai_compatible",
            AdvisoryClient::Anthropic(_) => "anthropic",
            AdvisoryClient::RuleBased(_) => "rule_based",
            AdvisoryClient::Mock(_) => "mock",
        }
    }

    /// One request, no retry. The rule-based backend reads the metrics
    /// directly and never fails.
    pub async fn advise(&self, metrics: &MetricsResult) -> Result<String> {
        let out = match self {
            AdvisoryClient::RuleBased(b) => Ok(b.advise(metrics)),
            AdvisoryClient::OpenaiCompatible(b) => b.complete(&build_prompt(metrics)).await,
            AdvisoryClient::Anthropic(b) => b.complete(&build_prompt(metrics)).await,
            AdvisoryClient::Mock(b) => b.complete(&build_prompt(metrics)).await,
        };
        if let Err(e) = &out {
            warn!(backend = self.name(), error = %e, "advisory request failed");
        }
        out
    }
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::UpstreamAdvisory(format!("http client: {e}")))
}

pub(crate) fn request_error(backend: &str, timeout: Duration, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::UpstreamAdvisory(format!(
            "{backend} request timed out after {}s",
            timeout.as_secs()
        ))
    } else {
        Error::UpstreamAdvisory(format!("{backend} request: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use ledgerlens_core::{InputKind, Transaction, TransactionSet};

    fn metrics() -> MetricsResult {
        let rows = [("Salary", 4000.0), ("Rent", -1500.0), ("Food", -320.0), ("Food", -80.0)]
            .into_iter()
            .map(|(c, a)| Transaction {
                date: "2024-04-01".into(),
                description: c.into(),
                amount: a,
                category: c.into(),
            })
            .collect();
        compute_metrics(&TransactionSet::from_rows(rows, InputKind::Tabular).unwrap())
    }

    #[test]
    fn test_prompt_interpolates_metrics() {
        let p = build_prompt(&metrics());
        assert!(p.contains("Total Income: $4000"), "{p}");
        assert!(p.contains("Total Expenses: $1900"), "{p}");
        assert!(p.contains("Savings Rate: 52.5%"), "{p}");
        assert!(p.contains("Top Spending Category: Rent ($1500.00)"), "{p}");
        assert!(p.contains("Anomalous Transactions: "));
        assert!(p.trim_end().ends_with(&format!("\"{DISCLAIMER}\"")));
    }

    #[test]
    fn test_default_settings() {
        let s = AdvisorySettings::default();
        assert_eq!(s.provider, Provider::OpenaiCompatible);
        assert_eq!(s.timeout(), Duration::from_secs(30));
        assert_eq!(s.api_key_env(), "NVIDIA_API_KEY");
        assert_eq!(s.base_url(), "https://integrate.api.nvidia.com");
        assert_eq!(s.model(), "nemotron-mini-4b-instruct");
    }

    #[test]
    fn test_provider_alone_picks_its_own_endpoint() {
        let s: AdvisorySettings = serde_json::from_str(r#"{"provider":"anthropic"}"#).unwrap();
        assert_eq!(s.base_url(), "https://api.anthropic.com");
        assert_eq!(s.api_key_env(), "ANTHROPIC_API_KEY");
        assert_eq!(s.model(), "claude-3-5-haiku-latest");
        let b = AnthropicBackend::new(&s, "k".to_string()).unwrap();
        assert_eq!(b.endpoint(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_explicit_values_override_provider_defaults() {
        let s: AdvisorySettings = serde_json::from_str(
            r#"{"provider":"anthropic","base_url":"http://proxy.local","api_key_env":"PROXY_KEY"}"#,
        )
        .unwrap();
        assert_eq!(s.base_url(), "http://proxy.local");
        assert_eq!(s.api_key_env(), "PROXY_KEY");
        assert_eq!(s.model(), "claude-3-5-haiku-latest");
    }

    #[test]
    fn test_missing_credential_is_advisory_failure() {
        let settings = AdvisorySettings {
            api_key_env: Some("LEDGERLENS_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..AdvisorySettings::default()
        };
        let err = AdvisoryClient::from_settings(&settings).err().unwrap();
        assert!(err.is_advisory());
        assert!(err.to_string().contains("LEDGERLENS_TEST_KEY_THAT_IS_NEVER_SET is missing"));
    }

    #[tokio::test]
    async fn test_mock_client_round_trip() {
        let settings = AdvisorySettings {
            provider: Provider::Mock,
            ..AdvisorySettings::default()
        };
        let client = AdvisoryClient::from_settings(&settings).unwrap();
        assert_eq!(client.name(), "mock");
        let text = client.advise(&metrics()).await.unwrap();
        assert!(text.contains("Rent"));
        assert!(text.ends_with(DISCLAIMER));
    }

    #[tokio::test]
    async fn test_rule_based_client_needs_no_credential() {
        let settings = AdvisorySettings {
            provider: Provider::RuleBased,
            ..AdvisorySettings::default()
        };
        let client = AdvisoryClient::from_settings(&settings).unwrap();
        assert_eq!(client.name(), "rule_based");
        let text = client.advise(&metrics()).await.unwrap();
        assert!(text.starts_with("Your total income is $4000.00."), "{text}");
        assert!(text.contains("savings rate of 52.50%"));
        assert!(text.contains("Your savings rate is strong."));
        assert!(text.contains("Your highest spending category is 'Rent', totaling $1500.00."));
        assert!(text.ends_with(&format!("Disclaimer: {DISCLAIMER}")));
    }

    #[tokio::test]
    async fn test_failing_backend_leaves_metrics_usable() {
        let m = metrics();
        let client = AdvisoryClient::Mock(MockBackend::failing());
        let err = client.advise(&m).await.unwrap_err();
        assert!(err.is_advisory());
        assert_eq!(m.total_income, 4000.0);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let s: AdvisorySettings =
            serde_json::from_str(r#"{"provider":"anthropic","model":"claude-3-5-haiku-latest"}"#).unwrap();
        assert_eq!(s.provider, Provider::Anthropic);
        assert_eq!(s.timeout_secs, 30);
    }
}
