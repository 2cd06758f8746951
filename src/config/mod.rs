pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PlannerError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> PlannerError {
    PlannerError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 兩種設定來源共用的檢查
pub(crate) fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    let endpoint = config.service_endpoint();
    let url = Url::parse(endpoint).map_err(|e| {
        invalid(
            "service.endpoint",
            endpoint,
            format!("the Gemini API base URL could not be parsed: {}", e),
        )
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            "service.endpoint",
            endpoint,
            format!("generateContent calls need http or https, not {}", url.scheme()),
        ));
    }

    if config.model().trim().is_empty() {
        return Err(invalid(
            "service.model",
            config.model(),
            "name the Gemini model, e.g. gemini-1.5-pro",
        ));
    }

    if config.request_timeout().as_secs() == 0 {
        return Err(invalid(
            "service.timeout_seconds",
            0,
            "the service call needs at least one second before the fallback list takes over",
        ));
    }

    if let Some(path) = config.audit_path() {
        if path.trim().is_empty() || path.contains('\0') {
            return Err(invalid(
                "audit.path",
                path.escape_debug(),
                "the audit trail needs a writable JSON-lines file path",
            ));
        }
    }

    Ok(())
}
