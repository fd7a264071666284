//! Room and furniture catalog
//!
//! The catalog is read once from TOML, validated, and then only looked up by
//! typed identifier. Lookups for unknown ids return an error instead of a
//! silent default.

use crate::error::{FurnishError, Result};
use crate::id::{FurnitureTypeId, RoomId};
use crate::types::Placement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.toml");

/// Named procedural layout scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Centered rows of single-seat desks facing the front
    Lecture,
    /// Isolated desks anchored at the front wall
    Exam,
    /// Multi-seat clusters on a coarse grid
    Groups,
    /// Chairs on a circle facing inward
    Circle,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Lecture,
        Scenario::Exam,
        Scenario::Groups,
        Scenario::Circle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Lecture => "lecture",
            Scenario::Exam => "exam",
            Scenario::Groups => "groups",
            Scenario::Circle => "circle",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lecture" | "rows" => Ok(Scenario::Lecture),
            "exam" => Ok(Scenario::Exam),
            "groups" | "clusters" => Ok(Scenario::Groups),
            "circle" => Ok(Scenario::Circle),
            other => Err(format!(
                "unknown scenario '{}'; valid values: lecture, exam, groups, circle",
                other
            )),
        }
    }
}

/// Acoustic score band thresholds (`warn < good`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticThresholds {
    pub warn: f32,
    pub good: f32,
}

impl Default for AcousticThresholds {
    fn default() -> Self {
        Self {
            warn: 0.05,
            good: 0.12,
        }
    }
}

/// A rectangular room centered on the origin
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSpec {
    pub id: RoomId,
    pub name: String,
    pub model: Option<String>,
    pub half_x: f32,
    pub half_z: f32,
    /// Nominal floor area used to normalize the acoustic score
    pub floor_area: f32,
    pub acoustics: AcousticThresholds,
}

impl RoomSpec {
    /// Create a room with the floor area implied by its half-extents
    pub fn new(id: impl Into<String>, half_x: f32, half_z: f32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: RoomId(id),
            model: None,
            half_x,
            half_z,
            floor_area: 4.0 * half_x * half_z,
            acoustics: AcousticThresholds::default(),
        }
    }
}

/// Footprint dimensions in metres (width along local X, depth along local Z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f32,
    pub depth: f32,
}

/// A placeable furniture type
#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureType {
    pub id: FurnitureTypeId,
    pub name: String,
    pub model: Option<String>,
    /// Collision radius in metres (already multiplied by the catalog scale)
    pub radius: f32,
    pub footprint: Option<Footprint>,
    pub seats: u32,
    pub wall_item: bool,
    /// Acoustic damping contribution
    pub acoustic: f32,
}

impl FurnitureType {
    /// Create a floor item with the given radius
    pub fn new(id: u32, name: impl Into<String>, radius: f32) -> Self {
        Self {
            id: FurnitureTypeId(id),
            name: name.into(),
            model: None,
            radius,
            footprint: None,
            seats: 0,
            wall_item: false,
            acoustic: 0.0,
        }
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seats = seats;
        self
    }

    pub fn with_footprint(mut self, width: f32, depth: f32) -> Self {
        self.footprint = Some(Footprint { width, depth });
        self
    }

    pub fn with_acoustic(mut self, acoustic: f32) -> Self {
        self.acoustic = acoustic;
        self
    }

    pub fn wall_mounted(mut self) -> Self {
        self.wall_item = true;
        self
    }

    /// Width used for packing, falling back to the collision diameter
    pub fn width(&self) -> f32 {
        self.footprint.map(|f| f.width).unwrap_or(2.0 * self.radius)
    }

    /// Depth used for packing, falling back to the collision diameter
    pub fn depth(&self) -> f32 {
        self.footprint.map(|f| f.depth).unwrap_or(2.0 * self.radius)
    }
}

/// Default furniture type per wizard scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardDefaults {
    #[serde(default)]
    pub lecture: Option<FurnitureTypeId>,
    #[serde(default)]
    pub exam: Option<FurnitureTypeId>,
    #[serde(default)]
    pub groups: Option<FurnitureTypeId>,
    #[serde(default)]
    pub circle: Option<FurnitureTypeId>,
}

impl WizardDefaults {
    pub fn get(&self, scenario: Scenario) -> Option<FurnitureTypeId> {
        match scenario {
            Scenario::Lecture => self.lecture,
            Scenario::Exam => self.exam,
            Scenario::Groups => self.groups,
            Scenario::Circle => self.circle,
        }
    }
}

/// A fixed, named arrangement
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub entries: Vec<Placement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogMeta {
    #[serde(default = "default_scale")]
    scale: f32,
    #[serde(default)]
    default_room: Option<String>,
}

impl Default for CatalogMeta {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            default_room: None,
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoomDef {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    model: Option<String>,
    half_extents: [f32; 2],
    #[serde(default)]
    floor_area: Option<f32>,
    #[serde(default)]
    acoustics: AcousticThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FurnitureDef {
    id: u32,
    name: String,
    #[serde(default)]
    model: Option<String>,
    radius: f32,
    #[serde(default)]
    footprint: Option<[f32; 2]>,
    #[serde(default)]
    seats: u32,
    #[serde(default)]
    wall_item: bool,
    #[serde(default)]
    acoustic: f32,
}

/// TOML file format for the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    catalog: CatalogMeta,
    #[serde(default)]
    rooms: BTreeMap<String, RoomDef>,
    #[serde(default)]
    furniture: Vec<FurnitureDef>,
    #[serde(default)]
    wizard: WizardDefaults,
    #[serde(default)]
    presets: BTreeMap<String, Vec<Placement>>,
}

/// Validated catalog of rooms, furniture types, wizard defaults and presets
#[derive(Debug, Clone)]
pub struct Catalog {
    rooms: BTreeMap<RoomId, RoomSpec>,
    furniture: BTreeMap<FurnitureTypeId, FurnitureType>,
    wizard: WizardDefaults,
    presets: BTreeMap<String, Preset>,
    default_room: RoomId,
}

impl Catalog {
    /// The catalog shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| {
            FurnishError::CatalogError(format!("Failed to parse catalog TOML: {}", e))
        })?;
        Self::from_file(file)
    }

    /// Build a catalog directly from validated parts (for tests and embedding)
    pub fn from_parts(
        rooms: Vec<RoomSpec>,
        furniture: Vec<FurnitureType>,
        wizard: WizardDefaults,
    ) -> Result<Self> {
        let default_room = rooms
            .first()
            .map(|r| r.id.clone())
            .ok_or_else(|| FurnishError::CatalogError("catalog defines no rooms".into()))?;

        let mut catalog = Self {
            rooms: BTreeMap::new(),
            furniture: BTreeMap::new(),
            wizard,
            presets: BTreeMap::new(),
            default_room,
        };

        for room in rooms {
            validate_room(&room)?;
            if catalog.rooms.insert(room.id.clone(), room.clone()).is_some() {
                return Err(FurnishError::CatalogError(format!(
                    "duplicate room id '{}'",
                    room.id
                )));
            }
        }
        for kind in furniture {
            validate_furniture(&kind)?;
            if catalog.furniture.insert(kind.id, kind.clone()).is_some() {
                return Err(FurnishError::CatalogError(format!(
                    "duplicate furniture id {}",
                    kind.id
                )));
            }
        }
        catalog.validate_references()?;
        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Result<Self> {
        let scale = file.catalog.scale;
        if !(scale > 0.0) {
            return Err(FurnishError::CatalogError(format!(
                "catalog scale must be positive, got {}",
                scale
            )));
        }

        let rooms = file
            .rooms
            .into_iter()
            .map(|(id, def)| {
                let [half_x, half_z] = def.half_extents;
                RoomSpec {
                    name: def.name.unwrap_or_else(|| id.clone()),
                    id: RoomId(id),
                    model: def.model,
                    half_x,
                    half_z,
                    floor_area: def.floor_area.unwrap_or(4.0 * half_x * half_z),
                    acoustics: def.acoustics,
                }
            })
            .collect::<Vec<_>>();

        let furniture = file
            .furniture
            .into_iter()
            .map(|def| FurnitureType {
                id: FurnitureTypeId(def.id),
                name: def.name,
                model: def.model,
                radius: def.radius * scale,
                footprint: def.footprint.map(|[width, depth]| Footprint { width, depth }),
                seats: def.seats,
                wall_item: def.wall_item,
                acoustic: def.acoustic,
            })
            .collect::<Vec<_>>();

        let mut catalog = Self::from_parts(rooms, furniture, file.wizard)?;

        if let Some(default_room) = file.catalog.default_room {
            let id = RoomId(default_room);
            if !catalog.rooms.contains_key(&id) {
                return Err(FurnishError::CatalogError(format!(
                    "default room '{}' is not defined",
                    id
                )));
            }
            catalog.default_room = id;
        }

        for (name, entries) in file.presets {
            for entry in &entries {
                if !catalog.furniture.contains_key(&entry.type_id) {
                    return Err(FurnishError::CatalogError(format!(
                        "preset '{}' references unknown furniture id {}",
                        name, entry.type_id
                    )));
                }
            }
            catalog.presets.insert(
                name.clone(),
                Preset {
                    name,
                    entries,
                },
            );
        }

        Ok(catalog)
    }

    fn validate_references(&self) -> Result<()> {
        for scenario in Scenario::ALL {
            if let Some(id) = self.wizard.get(scenario) {
                if !self.furniture.contains_key(&id) {
                    return Err(FurnishError::CatalogError(format!(
                        "wizard default for '{}' references unknown furniture id {}",
                        scenario, id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up a room by id
    pub fn room(&self, id: &RoomId) -> Result<&RoomSpec> {
        self.rooms
            .get(id)
            .ok_or_else(|| FurnishError::UnknownRoom(id.to_string()))
    }

    /// Look up a furniture type by id
    pub fn furniture(&self, id: FurnitureTypeId) -> Result<&FurnitureType> {
        self.furniture
            .get(&id)
            .ok_or(FurnishError::UnknownFurnitureType(id.raw()))
    }

    /// Look up a preset by name
    pub fn preset(&self, name: &str) -> Result<&Preset> {
        self.presets
            .get(name)
            .ok_or_else(|| FurnishError::UnknownPreset(name.to_string()))
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomSpec> {
        self.rooms.values()
    }

    pub fn furniture_types(&self) -> impl Iterator<Item = &FurnitureType> {
        self.furniture.values()
    }

    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(|s| s.as_str())
    }

    /// Default furniture type for a wizard scenario
    pub fn wizard_type(&self, scenario: Scenario) -> Option<FurnitureTypeId> {
        self.wizard.get(scenario)
    }

    pub fn default_room(&self) -> &RoomId {
        &self.default_room
    }
}

fn validate_room(room: &RoomSpec) -> Result<()> {
    if !(room.half_x > 0.0 && room.half_z > 0.0) {
        return Err(FurnishError::CatalogError(format!(
            "room '{}' must have positive half-extents",
            room.id
        )));
    }
    if !(room.floor_area > 0.0) {
        return Err(FurnishError::CatalogError(format!(
            "room '{}' must have a positive floor area",
            room.id
        )));
    }
    if room.acoustics.warn >= room.acoustics.good {
        return Err(FurnishError::CatalogError(format!(
            "room '{}' acoustic thresholds must satisfy warn < good",
            room.id
        )));
    }
    Ok(())
}

fn validate_furniture(kind: &FurnitureType) -> Result<()> {
    if !(kind.radius > 0.0) {
        return Err(FurnishError::CatalogError(format!(
            "furniture {} must have a positive radius",
            kind.id
        )));
    }
    if kind.acoustic < 0.0 {
        return Err(FurnishError::CatalogError(format!(
            "furniture {} has a negative acoustic coefficient",
            kind.id
        )));
    }
    if let Some(fp) = kind.footprint {
        if !(fp.width > 0.0 && fp.depth > 0.0) {
            return Err(FurnishError::CatalogError(format!(
                "furniture {} footprint must be positive",
                kind.id
            )));
        }
    }
    Ok(())
}
