use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::config::validate_provider;
use crate::core::planner::DEFAULT_SERVICE_TIMEOUT;
use crate::domain::model::RawShoppingRequest;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::config::Validate;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pantry-planner")]
#[command(about = "Budget-aware sattvic shopping list generator")]
pub struct CliConfig {
    #[arg(long, allow_hyphen_values = true, help = "Spending budget in INR")]
    pub budget: String,

    #[arg(long, help = "Free-text cooking goal")]
    pub goal: String,

    #[arg(long, help = "JSON file with dosha/preference context")]
    pub profile: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Append audit records to this JSON-lines file")]
    pub audit_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn raw_request(&self) -> RawShoppingRequest {
        RawShoppingRequest::new(self.budget.clone(), self.goal.clone())
    }
}

impl ConfigProvider for CliConfig {
    fn service_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        self.timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SERVICE_TIMEOUT)
    }

    fn audit_path(&self) -> Option<&str> {
        self.audit_path.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            budget: "800".to_string(),
            goal: "light week".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.service_endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.api_key().is_none());
        assert!(config.audit_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_raw_request_carries_budget_text() {
        let raw = config().raw_request();
        assert_eq!(raw.budget_inr, Some(serde_json::json!("800")));
        assert_eq!(raw.goal.as_deref(), Some("light week"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut bad_endpoint = config();
        bad_endpoint.endpoint = Some("ftp://example.com".to_string());
        assert!(bad_endpoint.validate().is_err());

        let mut zero_timeout = config();
        zero_timeout.timeout_seconds = Some(0);
        assert!(zero_timeout.validate().is_err());

        let mut empty_model = config();
        empty_model.model = Some(" ".to_string());
        assert!(empty_model.validate().is_err());
    }

    #[test]
    fn test_parses_command_line() {
        let config = CliConfig::try_parse_from([
            "pantry-planner",
            "--budget",
            "-5",
            "--goal",
            "dinner",
            "--timeout-seconds",
            "10",
            "--api-key",
            "abc",
        ])
        .unwrap();

        assert_eq!(config.budget, "-5");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.api_key(), Some("abc"));
    }
}
