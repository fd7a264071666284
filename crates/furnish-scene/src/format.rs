//! Plan file format definitions

use furnish_core::{Placement, RoomId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Root structure of a plan document: `{ roomId, items: [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFile {
    pub room_id: RoomId,
    #[serde(default)]
    pub items: Vec<Placement>,
}

impl PlanFile {
    /// Create an empty plan for a room
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: Placement) -> Self {
        self.items.push(item);
        self
    }
}

/// On-disk encoding of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Toml,
    Json,
}

impl PlanFormat {
    /// Pick a format from a file extension (`.toml` or `.json`)
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for PlanFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(PlanFormat::Toml),
            "json" => Ok(PlanFormat::Json),
            other => Err(format!("unknown plan format '{}'; expected toml or json", other)),
        }
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanFormat::Toml => write!(f, "toml"),
            PlanFormat::Json => write!(f, "json"),
        }
    }
}
