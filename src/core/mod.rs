pub mod fallback;
pub mod normalizer;
pub mod parse;
pub mod planner;
pub mod prompt;
pub mod request;

pub use crate::domain::model::{ShoppingList, ShoppingRequest};
pub use crate::domain::ports::{AuditStore, ConfigProvider, GenerativeTextService};
pub use crate::utils::error::Result;
