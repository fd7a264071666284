//! Plan saving

use crate::format::{PlanFile, PlanFormat};
use furnish_core::{Result, RoomId};
use furnish_registry::Registry;
use std::fs;
use std::path::Path;

/// Capture a registry as a plan for `room_id`
pub fn registry_to_plan(registry: &Registry, room_id: &RoomId) -> PlanFile {
    PlanFile {
        room_id: room_id.clone(),
        items: registry.snapshot(),
    }
}

/// Serialize a plan to a string
pub fn save_plan_string(plan: &PlanFile, format: PlanFormat) -> Result<String> {
    let content = match format {
        PlanFormat::Toml => toml::to_string_pretty(plan)?,
        PlanFormat::Json => serde_json::to_string_pretty(plan)?,
    };
    Ok(content)
}

/// Save a plan to a file, choosing the format from its extension (TOML by default)
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &PlanFile) -> Result<()> {
    let path = path.as_ref();
    let format = PlanFormat::from_path(path).unwrap_or(PlanFormat::Toml);
    let content = save_plan_string(plan, format)?;
    fs::write(path, content)?;
    Ok(())
}
