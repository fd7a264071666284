//! Furnish Scene - Plan serialization
//!
//! This crate handles loading and saving room plans as TOML or JSON.
//! Loading is per-entry: malformed or unknown items are skipped and
//! reported instead of failing the whole document.

mod format;
mod loader;
mod saver;

pub use format::{PlanFile, PlanFormat};
pub use loader::{load_plan, load_plan_string, ParsedPlan, SkippedEntry};
pub use saver::{registry_to_plan, save_plan, save_plan_string};
