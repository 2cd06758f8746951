use crate::domain::model::AuditRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Prompt in, raw text out. Implementations report timeouts, transport
/// failures and non-success replies as errors; the planner recovers from all of them.
#[async_trait]
pub trait GenerativeTextService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn service_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    /// `None` disables the audit trail.
    fn audit_path(&self) -> Option<&str>;
}
