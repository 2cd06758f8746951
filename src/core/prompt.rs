use crate::domain::model::{ProfileContext, ShoppingRequest};
use serde_json::json;

const RESPONSE_SCHEMA: &str = r#"{
  "summary": {
    "budget_inr": number,
    "estimated_cost_inr": number,
    "under_budget": boolean,
    "note": string
  },
  "items": [
    {
      "name": string,              // e.g., "Moong dal"
      "quantity": number,          // numeric quantity
      "unit": string,              // e.g., "kg", "g", "L", "pcs"
      "approx_price_inr": number,  // realistic estimate for Indian market
      "category": string,          // e.g., "grains", "legumes", "vegetables", "fruits", "dairy", "spices", "condiments"
      "priority": "high"|"medium"|"low" // high for essentials to meet the goal within budget
    }
  ]
}"#;

/// 組出送給生成服務的提示詞
pub fn build_prompt(request: &ShoppingRequest, profile: &ProfileContext) -> String {
    let preferences = profile.preferences.clone().unwrap_or_else(|| json!({}));
    let profile_summary = json!({
        "age": profile.age,
        "activity_level": profile.activity_level,
    });

    format!(
        "You are a Satvic (sattvic) diet expert. Create a shopping list that adheres strictly to sattvic principles \
(no onion, no garlic, no eggs, no mushrooms, no alcohol, no processed foods; emphasize whole grains, fresh vegetables, \
fruits, nuts, seeds, legumes like moong/urad/masoor, clean dairy like A2 milk/curd/paneer if appropriate). \
Optimize quantities to fit within a budget in INR.

User primary dosha: {primary}; secondary dosha: {secondary}.
User preferences: {preferences}.
User profile: {profile_summary}.

Budget (INR): {budget}
Cooking goal: {goal}

Return ONLY valid JSON with this schema:
{schema}
Ensure ALL items are sattvic-compliant. Prefer seasonal/local produce. If the budget is tight, prioritize essentials \
and mark optional items as low priority.",
        primary = profile.dosha_primary.as_deref().unwrap_or("unknown"),
        secondary = profile.dosha_secondary.as_deref().unwrap_or("unknown"),
        preferences = preferences,
        profile_summary = profile_summary,
        budget = request.budget,
        goal = request.goal,
        schema = RESPONSE_SCHEMA,
    )
}
