use crate::domain::model::{RawShoppingRequest, ShoppingRequest};
use crate::utils::error::{PlannerError, Result};
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// 驗證呼叫端輸入；這是整條管道唯一會拒絕請求的地方
    pub fn validate(raw: &RawShoppingRequest) -> Result<ShoppingRequest> {
        let budget = parse_budget(raw.budget_inr.as_ref())?;

        let goal = raw
            .goal
            .as_deref()
            .map(str::trim)
            .filter(|goal| !goal.is_empty())
            .ok_or_else(|| PlannerError::validation("goal", "goal cannot be empty"))?;

        Ok(ShoppingRequest {
            budget,
            goal: goal.to_string(),
        })
    }
}

fn parse_budget(value: Option<&Value>) -> Result<u64> {
    let budget = match value {
        None | Some(Value::Null) => {
            return Err(PlannerError::validation("budget_inr", "budget is required"))
        }
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u)
                    .map_err(|_| PlannerError::validation("budget_inr", "budget is too large"))?
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
                    _ => {
                        return Err(PlannerError::validation(
                            "budget_inr",
                            format!("{} is not a whole number", n),
                        ))
                    }
                }
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
            PlannerError::validation("budget_inr", format!("'{}' is not a whole number", s))
        })?,
        Some(other) => {
            return Err(PlannerError::validation(
                "budget_inr",
                format!("unsupported budget value: {}", other),
            ))
        }
    };

    if budget <= 0 {
        return Err(PlannerError::validation(
            "budget_inr",
            "budget must be greater than zero",
        ));
    }

    Ok(budget as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(budget: Value, goal: &str) -> RawShoppingRequest {
        RawShoppingRequest::new(budget, goal)
    }

    #[test]
    fn test_accepts_numeric_and_string_budgets() {
        let request = RequestValidator::validate(&raw(json!(800), "light week")).unwrap();
        assert_eq!(request.budget, 800);
        assert_eq!(request.goal, "light week");

        let request = RequestValidator::validate(&raw(json!(" 1200 "), "dinner")).unwrap();
        assert_eq!(request.budget, 1200);

        let request = RequestValidator::validate(&raw(json!(950.0), "dinner")).unwrap();
        assert_eq!(request.budget, 950);
    }

    #[test]
    fn test_goal_is_trimmed() {
        let request = RequestValidator::validate(&raw(json!(500), "  detox week \n")).unwrap();
        assert_eq!(request.goal, "detox week");
    }

    #[test]
    fn test_rejects_zero_and_negative_budget() {
        for budget in [json!(0), json!(-10), json!("0"), json!("-5")] {
            let err = RequestValidator::validate(&raw(budget.clone(), "dinner")).unwrap_err();
            assert!(
                matches!(err, PlannerError::ValidationError { ref field, .. } if field == "budget_inr"),
                "budget {} should be rejected",
                budget
            );
        }
    }

    #[test]
    fn test_rejects_non_numeric_budget() {
        for budget in [json!("abc"), json!(12.5), json!(true), json!([800]), Value::Null] {
            assert!(RequestValidator::validate(&raw(budget, "dinner")).is_err());
        }

        let missing = RawShoppingRequest {
            budget_inr: None,
            goal: Some("dinner".to_string()),
        };
        assert!(RequestValidator::validate(&missing).is_err());
    }

    #[test]
    fn test_rejects_empty_or_missing_goal() {
        let err = RequestValidator::validate(&raw(json!(800), "")).unwrap_err();
        assert!(matches!(err, PlannerError::ValidationError { ref field, .. } if field == "goal"));

        assert!(RequestValidator::validate(&raw(json!(800), "   ")).is_err());

        let missing = RawShoppingRequest {
            budget_inr: Some(json!(800)),
            goal: None,
        };
        assert!(RequestValidator::validate(&missing).is_err());
    }
}
