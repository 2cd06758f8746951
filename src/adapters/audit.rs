use crate::domain::model::AuditRecord;
use crate::domain::ports::AuditStore;
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// 每筆紀錄寫成一行 JSON，附加到檔案尾端
#[derive(Debug, Clone)]
pub struct JsonlAuditStore {
    path: PathBuf,
}

impl JsonlAuditStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, e: impl std::fmt::Display) -> PlannerError {
        PlannerError::AuditFailure {
            message: format!("{}: {}", self.path.display(), e),
        }
    }
}

#[async_trait]
impl AuditStore for JsonlAuditStore {
    async fn append(&self, record: &AuditRecord) -> Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.failure(e))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.failure(e))?;

        file.write_all(&line).await.map_err(|e| self.failure(e))?;
        file.flush().await.map_err(|e| self.failure(e))?;

        tracing::debug!("Audit record appended to {}", self.path.display());
        Ok(())
    }
}

/// Accepts and drops every record; used when auditing is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardAuditStore;

#[async_trait]
impl AuditStore for DiscardAuditStore {
    async fn append(&self, _record: &AuditRecord) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback::FallbackBuilder;
    use crate::domain::model::{ListSource, ShoppingRequest};
    use tempfile::TempDir;

    fn record(goal: &str) -> AuditRecord {
        let request = ShoppingRequest {
            budget: 800,
            goal: goal.to_string(),
        };
        let result = FallbackBuilder::default().build(&request);
        AuditRecord::new(request, result, ListSource::Fallback)
    }

    #[tokio::test]
    async fn test_appends_one_line_per_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/audit.jsonl");
        let store = JsonlAuditStore::new(&path);
        assert_eq!(store.path(), path.as_path());

        store.append(&record("first")).await.unwrap();
        store.append(&record("second")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["conversation_type"], "shopping_generate");
        assert_eq!(first["source"], "fallback");
        assert_eq!(first["request"]["goal"], "first");
        assert_eq!(first["result"]["summary"]["estimated_cost_inr"], 795);
    }

    #[tokio::test]
    async fn test_unwritable_path_reports_audit_failure() {
        let temp_dir = TempDir::new().unwrap();
        // 目錄本身不能當成檔案開啟
        let store = JsonlAuditStore::new(temp_dir.path());

        let err = store.append(&record("x")).await.unwrap_err();
        assert!(matches!(err, PlannerError::AuditFailure { .. }));
    }

    #[test]
    fn test_discard_store_accepts_everything() {
        assert!(tokio_test::block_on(DiscardAuditStore.append(&record("x"))).is_ok());
    }
}
