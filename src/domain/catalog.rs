use crate::domain::model::{CatalogItem, Priority};

/// 固定目錄中的一筆靜態資料
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub quantity: f64,
    pub unit: &'static str,
    pub approx_price: u64,
    pub category: &'static str,
    pub priority: Priority,
}

impl CatalogEntry {
    pub fn to_item(&self) -> CatalogItem {
        CatalogItem {
            name: self.name.to_string(),
            quantity: self.quantity,
            unit: self.unit.to_string(),
            approx_price: self.approx_price,
            category: self.category.to_string(),
            priority: self.priority,
        }
    }
}

const fn entry(
    name: &'static str,
    quantity: f64,
    unit: &'static str,
    approx_price: u64,
    category: &'static str,
    priority: Priority,
) -> CatalogEntry {
    CatalogEntry {
        name,
        quantity,
        unit,
        approx_price,
        category,
        priority,
    }
}

pub const ESSENTIALS: &[CatalogEntry] = &[
    entry("Whole wheat atta", 2.0, "kg", 120, "grains", Priority::High),
    entry("Moong dal", 1.0, "kg", 140, "legumes", Priority::High),
    entry("Seasonal mixed vegetables", 2.0, "kg", 160, "vegetables", Priority::High),
    entry("Tomatoes", 1.0, "kg", 60, "vegetables", Priority::High),
    entry("Cucumbers", 1.0, "kg", 50, "vegetables", Priority::Medium),
    entry("Fruits (bananas/apples seasonal)", 1.0, "kg", 90, "fruits", Priority::Medium),
    entry("A2 milk or curd", 1.0, "L", 70, "dairy", Priority::Medium),
    entry("Cold-pressed groundnut oil", 1.0, "L", 180, "condiments", Priority::High),
    entry("Rock salt (sendha namak)", 1.0, "kg", 40, "spices", Priority::High),
    entry("Turmeric powder", 100.0, "g", 30, "spices", Priority::High),
    entry("Cumin seeds", 100.0, "g", 35, "spices", Priority::High),
    entry("Coriander powder", 100.0, "g", 30, "spices", Priority::High),
    entry("Jaggery (unrefined)", 500.0, "g", 40, "condiments", Priority::Medium),
    entry("Peanuts or almonds", 250.0, "g", 120, "nuts & seeds", Priority::Medium),
];

pub const EXTRAS: &[CatalogEntry] = &[
    entry("Ghee (cow)", 200.0, "g", 150, "dairy", Priority::Low),
    entry("Sesame seeds", 200.0, "g", 80, "nuts & seeds", Priority::Low),
    entry("Coconut (fresh)", 1.0, "pcs", 40, "fruits", Priority::Low),
];

/// Read-only essentials/extras tables shared by every request.
#[derive(Debug, Clone, Copy)]
pub struct FixedCatalog {
    essentials: &'static [CatalogEntry],
    extras: &'static [CatalogEntry],
}

impl FixedCatalog {
    pub const fn new(essentials: &'static [CatalogEntry], extras: &'static [CatalogEntry]) -> Self {
        Self { essentials, extras }
    }

    pub const fn builtin() -> Self {
        Self::new(ESSENTIALS, EXTRAS)
    }

    pub fn essentials(&self) -> &'static [CatalogEntry] {
        self.essentials
    }

    pub fn extras(&self) -> &'static [CatalogEntry] {
        self.extras
    }

    pub fn essentials_total(&self) -> u64 {
        self.essentials.iter().map(|e| e.approx_price).sum()
    }

    /// 所有 high 品項的總價；預算不低於此值時備援清單保證不超支
    pub fn high_priority_total(&self) -> u64 {
        self.essentials
            .iter()
            .filter(|e| e.priority == Priority::High)
            .map(|e| e.approx_price)
            .sum()
    }
}

impl Default for FixedCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
