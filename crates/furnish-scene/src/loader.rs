//! Plan loading with per-entry recovery

use crate::format::PlanFormat;
use furnish_core::{Catalog, FurnishError, Placement, Result, RoomId};
use std::fs;
use std::path::Path;

/// An item that was left out while loading a plan
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// Index of the item when it was dropped
    pub index: usize,
    pub reason: String,
}

/// A plan read from a document, before it is applied to a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPlan {
    /// `None` when the document has no usable `roomId`
    pub room_id: Option<RoomId>,
    pub items: Vec<Placement>,
    pub skipped: Vec<SkippedEntry>,
}

impl ParsedPlan {
    /// Move items whose furniture type is not in `catalog` to `skipped`
    pub fn retain_known(&mut self, catalog: &Catalog) {
        let mut kept = Vec::with_capacity(self.items.len());
        for (index, item) in std::mem::take(&mut self.items).into_iter().enumerate() {
            match catalog.furniture(item.type_id) {
                Ok(_) => kept.push(item),
                Err(e) => {
                    tracing::warn!("plan item {} skipped: {}", index, e);
                    self.skipped.push(SkippedEntry {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }
        self.items = kept;
    }
}

/// Load a plan from a file.
///
/// The format comes from the extension; other extensions are sniffed
/// (a leading `{` means JSON).
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<ParsedPlan> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let format = PlanFormat::from_path(path).unwrap_or_else(|| sniff(&content));
    load_plan_string(&content, format)
}

fn sniff(content: &str) -> PlanFormat {
    if content.trim_start().starts_with('{') {
        PlanFormat::Json
    } else {
        PlanFormat::Toml
    }
}

/// Load a plan from a string.
///
/// Only an unreadable document is an error. Items that fail to parse are
/// skipped individually.
pub fn load_plan_string(content: &str, format: PlanFormat) -> Result<ParsedPlan> {
    match format {
        PlanFormat::Toml => parse_toml(content),
        PlanFormat::Json => parse_json(content),
    }
}

fn parse_toml(content: &str) -> Result<ParsedPlan> {
    let document: toml::Table = toml::from_str(content)
        .map_err(|e| FurnishError::PlanParse(format!("invalid TOML plan: {}", e)))?;

    let mut plan = ParsedPlan {
        room_id: document
            .get("roomId")
            .and_then(|v| v.as_str())
            .map(RoomId::from),
        ..ParsedPlan::default()
    };

    let items = match document.get("items") {
        Some(toml::Value::Array(items)) => items.as_slice(),
        Some(_) => {
            return Err(FurnishError::PlanParse(
                "'items' must be an array".to_string(),
            ))
        }
        None => &[],
    };

    for (index, item) in items.iter().enumerate() {
        match item.clone().try_into::<Placement>() {
            Ok(placement) => accept(&mut plan, index, placement),
            Err(e) => skip(&mut plan, index, e.to_string()),
        }
    }
    Ok(plan)
}

fn parse_json(content: &str) -> Result<ParsedPlan> {
    let document: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| FurnishError::PlanParse(format!("invalid JSON plan: {}", e)))?;
    let document = document
        .as_object()
        .ok_or_else(|| FurnishError::PlanParse("plan must be a JSON object".to_string()))?;

    let mut plan = ParsedPlan {
        room_id: document
            .get("roomId")
            .and_then(|v| v.as_str())
            .map(RoomId::from),
        ..ParsedPlan::default()
    };

    let items = match document.get("items") {
        Some(serde_json::Value::Array(items)) => items.as_slice(),
        Some(serde_json::Value::Null) | None => &[],
        Some(_) => {
            return Err(FurnishError::PlanParse(
                "'items' must be an array".to_string(),
            ))
        }
    };

    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<Placement>(item.clone()) {
            Ok(placement) => accept(&mut plan, index, placement),
            Err(e) => skip(&mut plan, index, e.to_string()),
        }
    }
    Ok(plan)
}

/// Keep an item unless a coordinate is NaN or infinite
fn accept(plan: &mut ParsedPlan, index: usize, placement: Placement) {
    if placement.x.is_finite() && placement.z.is_finite() && placement.rotation.is_finite() {
        plan.items.push(placement);
    } else {
        skip(plan, index, "non-finite coordinates".to_string());
    }
}

fn skip(plan: &mut ParsedPlan, index: usize, reason: String) {
    tracing::warn!("plan item {} skipped: {}", index, reason);
    plan.skipped.push(SkippedEntry { index, reason });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PlanFile;
    use crate::saver::{save_plan, save_plan_string};
    use furnish_core::{FurnitureTypeId, Vec2};

    fn sample() -> PlanFile {
        PlanFile::new(RoomId::from("deep"))
            .with_item(Placement::new(FurnitureTypeId(1), Vec2::new(0.1, -1.3), 0.7853982))
            .with_item(
                Placement::new(FurnitureTypeId(6), Vec2::new(-2.25, 3.0), -1.2)
                    .with_annotation("by the window"),
            )
    }

    #[test]
    fn test_toml_roundtrip() {
        let plan = sample();
        let content = save_plan_string(&plan, PlanFormat::Toml).unwrap();
        let parsed = load_plan_string(&content, PlanFormat::Toml).unwrap();

        assert_eq!(parsed.room_id, Some(plan.room_id));
        assert_eq!(parsed.items, plan.items);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let plan = sample();
        let content = save_plan_string(&plan, PlanFormat::Json).unwrap();
        let parsed = load_plan_string(&content, PlanFormat::Json).unwrap();
        assert_eq!(parsed.items, plan.items);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let json = r#"{
            "roomId": "standard",
            "items": [
                { "typeId": 2, "x": 1.0, "z": 0.5, "rot": 0.0 },
                { "typeId": "two", "x": 1.0, "z": 0.5 },
                { "x": 1.0 },
                { "typeId": 3, "x": -1.0, "z": -1.0 }
            ]
        }"#;
        let parsed = load_plan_string(json, PlanFormat::Json).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(
            parsed.skipped.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![1, 2]
        );
        // missing rot defaults to zero
        assert_eq!(parsed.items[1].rotation, 0.0);
    }

    #[test]
    fn test_non_finite_entries_are_skipped() {
        let toml_str = r#"
roomId = "standard"

[[items]]
typeId = 2
x = nan
z = 0.0

[[items]]
typeId = 2
x = 1.0
z = 1.0
rot = inf

[[items]]
typeId = 2
x = 1.0
z = -1.0
"#;
        let parsed = load_plan_string(toml_str, PlanFormat::Toml).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(
            parsed.skipped.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![0, 1]
        );

        // 1e39 overflows f32
        let json = r#"{"roomId": "standard", "items": [{"typeId": 2, "x": 1e39, "z": 0.0}]}"#;
        let parsed = load_plan_string(json, PlanFormat::Json).unwrap();
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn test_missing_room_id() {
        let parsed = load_plan_string("[[items]]\ntypeId = 1\nx = 0.0\nz = 0.0\n", PlanFormat::Toml)
            .unwrap();
        assert_eq!(parsed.room_id, None);
        assert_eq!(parsed.items.len(), 1);
    }

    #[test]
    fn test_unreadable_document_is_error() {
        assert!(matches!(
            load_plan_string("not = [valid", PlanFormat::Toml),
            Err(FurnishError::PlanParse(_))
        ));
        assert!(matches!(
            load_plan_string("[1, 2]", PlanFormat::Json),
            Err(FurnishError::PlanParse(_))
        ));
    }

    #[test]
    fn test_retain_known() {
        let catalog = Catalog::builtin().unwrap();
        let mut plan = ParsedPlan {
            room_id: None,
            items: vec![
                Placement::new(FurnitureTypeId(2), Vec2::ZERO, 0.0),
                Placement::new(FurnitureTypeId(99), Vec2::ZERO, 0.0),
            ],
            skipped: Vec::new(),
        };
        plan.retain_known(&catalog);
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.skipped[0].index, 1);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("furnish_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        for name in ["plan.toml", "plan.json", "plan.layout"] {
            let path = dir.join(name);
            save_plan(&path, &sample()).unwrap();
            let parsed = load_plan(&path).unwrap();
            assert_eq!(parsed.items, sample().items, "{}", name);
        }

        fs::remove_dir_all(&dir).ok();
    }
}
