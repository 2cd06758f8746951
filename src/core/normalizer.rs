//! Coerces an untrusted candidate object into a complete [`ShoppingList`].
//!
//! Every field has a documented default, so normalization never fails:
//!
//! | field                 | default                                 |
//! |-----------------------|-----------------------------------------|
//! | `budget_inr`          | the validated request budget            |
//! | `estimated_cost_inr`  | item prices summed, then rounded once   |
//! | `under_budget`        | always `estimated_cost <= budget`       |
//! | `note`                | `""`                                    |
//! | item `name`           | `"Item"`                                |
//! | item `quantity`       | `0`                                     |
//! | item `unit`           | `""`                                    |
//! | item `approx_price_inr` | `0`                                   |
//! | item `category`       | `"other"`                               |
//! | item `priority`       | `medium`                                |

use crate::domain::model::{CatalogItem, Priority, ShoppingList, ShoppingRequest, ShoppingSummary};
use serde_json::{Map, Value};

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn normalize(candidate: &Map<String, Value>, request: &ShoppingRequest) -> ShoppingList {
        let (items, prices): (Vec<CatalogItem>, Vec<f64>) = match candidate.get("items") {
            Some(Value::Array(raw_items)) => raw_items.iter().map(normalize_item).unzip(),
            _ => (Vec::new(), Vec::new()),
        };

        let summary = candidate.get("summary").and_then(Value::as_object);
        let field = |name: &str| summary.and_then(|s| s.get(name));

        let budget = field("budget_inr")
            .and_then(coerce_positive_integer)
            .unwrap_or(request.budget);

        let estimated_cost = field("estimated_cost_inr")
            .and_then(coerce_positive_integer)
            .unwrap_or_else(|| round_price(prices.iter().sum()));

        if let Some(claimed) = field("under_budget").and_then(Value::as_bool) {
            if claimed != (estimated_cost <= budget) {
                tracing::debug!(
                    claimed,
                    budget,
                    estimated_cost,
                    "Ignoring inconsistent under_budget from service"
                );
            }
        }

        let note = field("note").and_then(coerce_present_text).unwrap_or_default();

        ShoppingList {
            summary: ShoppingSummary::new(budget, estimated_cost, note),
            items,
        }
    }
}

/// 回傳正規化後的品項以及服務原始給的價格（未取整）
fn normalize_item(raw: &Value) -> (CatalogItem, f64) {
    let field = |name: &str| raw.as_object().and_then(|obj| obj.get(name));

    let price = field("approx_price_inr")
        .and_then(coerce_number)
        .filter(|price| *price > 0.0)
        .unwrap_or(0.0);

    let item = CatalogItem {
        name: field("name")
            .and_then(coerce_present_text)
            .unwrap_or_else(|| "Item".to_string()),
        quantity: field("quantity").and_then(coerce_number).unwrap_or(0.0),
        unit: field("unit").and_then(coerce_text).unwrap_or_default(),
        approx_price: round_price(price),
        category: field("category")
            .and_then(coerce_text)
            .filter(|category| !category.is_empty())
            .unwrap_or_else(|| "other".to_string()),
        priority: field("priority")
            .and_then(Value::as_str)
            .and_then(Priority::parse)
            .unwrap_or_default(),
    };

    (item, price)
}

/// Nearest whole rupee; saturates on out-of-range values.
fn round_price(price: f64) -> u64 {
    price.round() as u64
}

/// Like [`coerce_text`], but `false`, `0` and `""` count as missing.
fn coerce_present_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        _ => coerce_text(value).filter(|text| !text.is_empty()),
    }
}

/// Strings pass through; numbers and booleans are rendered; everything else is absent.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// 取字串開頭的整數部分，例如 "800 INR" 得到 800；小數一律捨去
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn coerce_positive_integer(value: &Value) -> Option<u64> {
    coerce_integer(value)
        .filter(|n| *n > 0)
        .map(|n| n as u64)
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
