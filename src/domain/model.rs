use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 品項的重要程度，預算不足時由低到高依序捨棄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Case-insensitive lookup; anything outside the three tiers is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(rename = "approx_price_inr")]
    pub approx_price: u64,
    pub category: String,
    pub priority: Priority,
}

/// 已通過驗證的請求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingRequest {
    #[serde(rename = "budget_inr")]
    pub budget: u64,
    pub goal: String,
}

/// Caller input before validation. Field names match the HTTP body
/// `{ "budget_inr": ..., "goal": ... }`; the budget may arrive as a number
/// or a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawShoppingRequest {
    #[serde(default)]
    pub budget_inr: Option<serde_json::Value>,
    #[serde(default)]
    pub goal: Option<String>,
}

impl RawShoppingRequest {
    pub fn new(budget_inr: impl Into<serde_json::Value>, goal: impl Into<String>) -> Self {
        Self {
            budget_inr: Some(budget_inr.into()),
            goal: Some(goal.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingSummary {
    #[serde(rename = "budget_inr")]
    pub budget: u64,
    #[serde(rename = "estimated_cost_inr")]
    pub estimated_cost: u64,
    pub under_budget: bool,
    pub note: String,
}

impl ShoppingSummary {
    /// `under_budget` is always derived from the two amounts.
    pub fn new(budget: u64, estimated_cost: u64, note: String) -> Self {
        Self {
            budget,
            estimated_cost,
            under_budget: estimated_cost <= budget,
            note,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub summary: ShoppingSummary,
    pub items: Vec<CatalogItem>,
}

impl ShoppingList {
    pub fn items_total(&self) -> u64 {
        self.items.iter().map(|item| item.approx_price).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSource {
    Ai,
    Fallback,
}

/// 使用者背景資料，只用來組提示詞
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileContext {
    #[serde(default)]
    pub dosha_primary: Option<String>,
    #[serde(default)]
    pub dosha_secondary: Option<String>,
    #[serde(default)]
    pub preferences: Option<serde_json::Value>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub activity_level: Option<String>,
}

pub const AUDIT_CONVERSATION_TYPE: &str = "shopping_generate";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub conversation_type: String,
    pub created_at: DateTime<Utc>,
    pub source: ListSource,
    pub request: ShoppingRequest,
    pub result: ShoppingList,
}

impl AuditRecord {
    pub fn new(request: ShoppingRequest, result: ShoppingList, source: ListSource) -> Self {
        Self {
            conversation_type: AUDIT_CONVERSATION_TYPE.to_string(),
            created_at: Utc::now(),
            source,
            request,
            result,
        }
    }
}

/// 對外回傳的結果外層
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub source: ListSource,
    pub data: ShoppingList,
}

impl GenerateResponse {
    pub fn new(source: ListSource, data: ShoppingList) -> Self {
        Self {
            success: true,
            source,
            data,
        }
    }
}
