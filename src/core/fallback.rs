//! Deterministic budget fitting over the fixed catalog.
//!
//! Essentials are trimmed tier by tier (`low`, then `medium`, then `high`),
//! scanning each tier from the end of the list, until the running total fits
//! the budget. When the essentials leave at least [`EXTRAS_SLACK_THRESHOLD`]
//! unspent, optional extras are appended in catalog order while they still fit.

use crate::domain::catalog::FixedCatalog;
use crate::domain::model::{CatalogItem, Priority, ShoppingList, ShoppingRequest, ShoppingSummary};

/// 預算剩餘至少這麼多時才考慮加購選配品項
pub const EXTRAS_SLACK_THRESHOLD: u64 = 150;

/// Tiers in the order they are given up under budget pressure.
pub const DEGRADE_ORDER: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackBuilder {
    catalog: FixedCatalog,
}

impl FallbackBuilder {
    pub fn new(catalog: FixedCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &FixedCatalog {
        &self.catalog
    }

    pub fn build(&self, request: &ShoppingRequest) -> ShoppingList {
        let budget = request.budget;
        let mut items: Vec<CatalogItem> = self
            .catalog
            .essentials()
            .iter()
            .map(|entry| entry.to_item())
            .collect();
        let mut total: u64 = items.iter().map(|item| item.approx_price).sum();

        if total > budget {
            total = trim_to_budget(&mut items, total, budget);
        } else if budget - total >= EXTRAS_SLACK_THRESHOLD {
            for extra in self.catalog.extras() {
                if total + extra.approx_price <= budget {
                    items.push(extra.to_item());
                    total += extra.approx_price;
                }
            }
        }

        tracing::debug!(
            budget,
            total,
            items = items.len(),
            "Built fallback shopping list"
        );

        ShoppingList {
            summary: ShoppingSummary::new(budget, total, format!("Fallback list for: {}", request.goal)),
            items,
        }
    }
}

/// Returns the new total.
fn trim_to_budget(items: &mut Vec<CatalogItem>, mut total: u64, budget: u64) -> u64 {
    for tier in DEGRADE_ORDER {
        let mut index = items.len();
        while index > 0 && total > budget {
            index -= 1;
            if items[index].priority == tier {
                total -= items[index].approx_price;
                items.remove(index);
            }
        }

        if total <= budget {
            break;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CatalogEntry, ESSENTIALS, EXTRAS};

    fn request(budget: u64, goal: &str) -> ShoppingRequest {
        ShoppingRequest {
            budget,
            goal: goal.to_string(),
        }
    }

    fn names(list: &ShoppingList) -> Vec<&str> {
        list.items.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn test_exact_budget_keeps_essentials_without_extras() {
        let list = FallbackBuilder::default().build(&request(1165, "dinner"));

        assert_eq!(list.items.len(), 14);
        assert_eq!(list.summary.budget, 1165);
        assert_eq!(list.summary.estimated_cost, 1165);
        assert!(list.summary.under_budget);
        assert_eq!(list.summary.note, "Fallback list for: dinner");

        let expected: Vec<&str> = ESSENTIALS.iter().map(|e| e.name).collect();
        assert_eq!(names(&list), expected);
    }

    #[test]
    fn test_tight_budget_removes_medium_items_from_the_end() {
        let list = FallbackBuilder::default().build(&request(800, "light week"));

        assert_eq!(list.items.len(), 9);
        assert_eq!(list.summary.estimated_cost, 795);
        assert!(list.summary.under_budget);
        assert!(list.items.iter().all(|item| item.priority == Priority::High));

        for removed in [
            "Peanuts or almonds",
            "Jaggery (unrefined)",
            "A2 milk or curd",
            "Fruits (bananas/apples seasonal)",
            "Cucumbers",
        ] {
            assert!(!names(&list).contains(&removed), "{} should be removed", removed);
        }
    }

    #[test]
    fn test_removal_stops_once_budget_fits() {
        // 移除 Peanuts (120) 之後 1045 <= 1100，其餘 medium 品項保留
        let list = FallbackBuilder::default().build(&request(1100, "week"));

        assert_eq!(list.items.len(), 13);
        assert_eq!(list.summary.estimated_cost, 1045);
        assert!(!names(&list).contains(&"Peanuts or almonds"));
        assert!(names(&list).contains(&"Jaggery (unrefined)"));
    }

    #[test]
    fn test_generous_budget_adds_extras_in_order() {
        let list = FallbackBuilder::default().build(&request(2000, "detox week"));

        assert_eq!(list.items.len(), 17);
        assert_eq!(list.summary.estimated_cost, 1435);
        assert!(list.summary.under_budget);
        assert_eq!(
            &names(&list)[14..],
            &["Ghee (cow)", "Sesame seeds", "Coconut (fresh)"]
        );
    }

    #[test]
    fn test_extras_skip_items_that_do_not_fit() {
        // 剩 200：Ghee (150) 放得下，Sesame (80) 放不下，Coconut (40) 放得下
        let list = FallbackBuilder::default().build(&request(1365, "festival"));

        assert_eq!(
            &names(&list)[14..],
            &["Ghee (cow)", "Coconut (fresh)"]
        );
        assert_eq!(list.summary.estimated_cost, 1355);
    }

    #[test]
    fn test_small_slack_adds_nothing() {
        let list = FallbackBuilder::default().build(&request(1314, "dinner"));

        assert_eq!(list.items.len(), 14);
        assert_eq!(list.summary.estimated_cost, 1165);
    }

    #[test]
    fn test_budget_below_high_tier_removes_high_items_too() {
        let list = FallbackBuilder::default().build(&request(500, "minimal"));

        assert!(list.summary.estimated_cost <= 500);
        assert_eq!(list.summary.estimated_cost, list.items_total());
        assert!(list.summary.under_budget);
    }

    #[test]
    fn test_high_tier_is_trimmed_last() {
        const MIXED: &[CatalogEntry] = &[
            CatalogEntry {
                name: "Staple",
                quantity: 1.0,
                unit: "kg",
                approx_price: 300,
                category: "grains",
                priority: Priority::High,
            },
            CatalogEntry {
                name: "Snack",
                quantity: 1.0,
                unit: "pcs",
                approx_price: 20,
                category: "other",
                priority: Priority::Low,
            },
        ];
        let builder = FallbackBuilder::new(FixedCatalog::new(MIXED, EXTRAS));

        let list = builder.build(&request(310, "tiny"));
        assert_eq!(names(&list), vec!["Staple"]);
        assert_eq!(list.summary.estimated_cost, 300);

        let list = builder.build(&request(100, "tiny"));
        assert!(list.items.is_empty());
        assert_eq!(list.summary.estimated_cost, 0);
        assert!(list.summary.under_budget);
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = FallbackBuilder::default();
        for budget in [1, 300, 799, 800, 1165, 1315, 2000, 10_000] {
            let req = request(budget, "repeat");
            let first = serde_json::to_vec(&builder.build(&req)).unwrap();
            let second = serde_json::to_vec(&builder.build(&req)).unwrap();
            assert_eq!(first, second, "budget {} produced different output", budget);
        }
    }

    #[test]
    fn test_budget_respected_whenever_high_tier_fits() {
        let builder = FallbackBuilder::default();
        let floor = builder.catalog().high_priority_total();

        for budget in (floor..=2500).step_by(5) {
            let list = builder.build(&request(budget, "sweep"));
            assert!(
                list.summary.estimated_cost <= budget,
                "budget {} exceeded: {}",
                budget,
                list.summary.estimated_cost
            );
            assert_eq!(list.summary.estimated_cost, list.items_total());
            assert!(list.summary.under_budget);
        }
    }
}
