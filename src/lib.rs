pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{DiscardAuditStore, GeminiClient, JsonlAuditStore};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{fallback::FallbackBuilder, planner::ShoppingPlanner};
pub use crate::domain::model::{
    GenerateResponse, ListSource, ProfileContext, RawShoppingRequest, ShoppingList,
    ShoppingRequest,
};
pub use crate::utils::error::{PlannerError, Result};
