use crate::core::fallback::FallbackBuilder;
use crate::core::normalizer::ResponseNormalizer;
use crate::core::parse::parse_candidate;
use crate::core::prompt::build_prompt;
use crate::core::request::RequestValidator;
use crate::domain::model::{
    AuditRecord, GenerateResponse, ListSource, ProfileContext, RawShoppingRequest, ShoppingList,
    ShoppingRequest,
};
use crate::domain::ports::{AuditStore, GenerativeTextService};
use crate::utils::error::{PlannerError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_SERVICE_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs one shopping-list request end to end.
///
/// Only an invalid request is ever returned as an error. Service failures,
/// unreadable replies and audit failures are absorbed: the first two switch
/// to the deterministic fallback list, the last one is only logged.
pub struct ShoppingPlanner<G: GenerativeTextService, A: AuditStore + 'static> {
    service: G,
    audit: Arc<A>,
    fallback: FallbackBuilder,
    timeout: Duration,
}

impl<G: GenerativeTextService, A: AuditStore + 'static> ShoppingPlanner<G, A> {
    pub fn new(service: G, audit: A) -> Self {
        Self {
            service,
            audit: Arc::new(audit),
            fallback: FallbackBuilder::default(),
            timeout: DEFAULT_SERVICE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackBuilder) -> Self {
        self.fallback = fallback;
        self
    }

    pub async fn generate(
        &self,
        raw: &RawShoppingRequest,
        profile: &ProfileContext,
    ) -> Result<GenerateResponse> {
        let (response, _audit_task) = self.generate_detached(raw, profile).await?;
        Ok(response)
    }

    /// Same as [`generate`](Self::generate) but also hands back the audit
    /// task, for callers that want to wait for the write before shutting down.
    pub async fn generate_detached(
        &self,
        raw: &RawShoppingRequest,
        profile: &ProfileContext,
    ) -> Result<(GenerateResponse, JoinHandle<()>)> {
        tracing::debug!("Validating shopping request");
        let request = match RequestValidator::validate(raw) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejected shopping request: {}", e);
                return Err(e);
            }
        };

        let (source, list) = match self.request_candidate(&request, profile).await {
            Ok(candidate) => {
                tracing::debug!("Normalizing generated shopping list");
                (
                    ListSource::Ai,
                    ResponseNormalizer::normalize(&candidate, &request),
                )
            }
            Err(e) => {
                tracing::warn!(
                    "Using fallback shopping list: {} (Category: {:?})",
                    e,
                    e.category()
                );
                (ListSource::Fallback, self.fallback.build(&request))
            }
        };

        tracing::info!(
            source = ?source,
            budget = list.summary.budget,
            estimated_cost = list.summary.estimated_cost,
            items = list.items.len(),
            "Shopping list ready"
        );

        let audit_task = self.spawn_audit(request, list.clone(), source);

        Ok((GenerateResponse::new(source, list), audit_task))
    }

    /// 呼叫生成服務並解析回覆；任何失敗都交由呼叫端改用備援清單
    async fn request_candidate(
        &self,
        request: &ShoppingRequest,
        profile: &ProfileContext,
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        let prompt = build_prompt(request, profile);

        tracing::debug!(timeout = ?self.timeout, "Calling generative service");
        let text = tokio::time::timeout(self.timeout, self.service.generate(&prompt))
            .await
            .map_err(|_| PlannerError::ServiceTimeout {
                timeout: self.timeout,
            })??;

        tracing::debug!(chars = text.len(), "Parsing generative response");
        parse_candidate(&text)
    }

    fn spawn_audit(
        &self,
        request: ShoppingRequest,
        result: ShoppingList,
        source: ListSource,
    ) -> JoinHandle<()> {
        let audit = Arc::clone(&self.audit);
        let record = AuditRecord::new(request, result, source);

        tokio::spawn(async move {
            if let Err(e) = audit.append(&record).await {
                tracing::warn!("Audit write failed, ignoring: {}", e);
            }
        })
    }

    pub fn build_fallback(&self, request: &ShoppingRequest) -> ShoppingList {
        self.fallback.build(request)
    }
}
