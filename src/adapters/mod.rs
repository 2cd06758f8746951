// Adapters layer: concrete implementations of the domain ports.

pub mod audit;
pub mod gemini;

pub use audit::{DiscardAuditStore, JsonlAuditStore};
pub use gemini::GeminiClient;
