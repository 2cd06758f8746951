use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::config::validate_provider;
use crate::core::planner::DEFAULT_SERVICE_TIMEOUT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PlannerError, Result};
use crate::config::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_AUDIT_PATH: &str = "./audit/shopping.jsonl";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    pub audit: Option<AuditConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub enabled: bool,
    pub path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於檔案內容
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(endpoint) = &cli.endpoint {
            self.service.endpoint = Some(endpoint.clone());
        }
        if let Some(model) = &cli.model {
            self.service.model = Some(model.clone());
        }
        if let Some(api_key) = &cli.api_key {
            self.service.api_key = Some(api_key.clone());
        }
        if let Some(timeout) = cli.timeout_seconds {
            self.service.timeout_seconds = Some(timeout);
        }
        if let Some(path) = &cli.audit_path {
            self.audit = Some(AuditConfig {
                enabled: true,
                path: Some(path.clone()),
            });
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn service_endpoint(&self) -> &str {
        self.service.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn model(&self) -> &str {
        self.service.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_key(&self) -> Option<&str> {
        // 沒有被替換掉的 ${VAR} 視為未設定
        self.service
            .api_key
            .as_deref()
            .filter(|key| !(key.starts_with("${") && key.ends_with('}')))
    }

    fn request_timeout(&self) -> Duration {
        self.service
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SERVICE_TIMEOUT)
    }

    fn audit_path(&self) -> Option<&str> {
        self.audit
            .as_ref()
            .filter(|audit| audit.enabled)
            .map(|audit| audit.path.as_deref().unwrap_or(DEFAULT_AUDIT_PATH))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
