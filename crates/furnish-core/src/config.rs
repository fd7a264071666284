//! Layered engine configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `FURNISH_COLLISION_FACTOR`, `FURNISH_MARGIN_FACTOR`,
//!    `FURNISH_GRID_STEP`
//! 2. A TOML file (`--config <path>` or `./furnish.toml`)
//! 3. Built-in defaults
//!
//! Every field carries a serde default, so a file only needs the keys it changes.

use crate::error::{FurnishError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Boundary and collision solver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Fraction of the radius kept clear of each wall by floor items
    #[serde(default = "default_margin_factor")]
    pub margin_factor: f32,
    /// Multiplier on `r1 + r2` below which two floor items are flagged as colliding
    #[serde(default = "default_collision_factor")]
    pub collision_factor: f32,
    /// Distance between a wall item's anchor and its wall
    #[serde(default = "default_wall_offset")]
    pub wall_offset: f32,
    /// Distance kept between a wall item and the corners of its wall
    #[serde(default = "default_wall_inset")]
    pub wall_inset: f32,
    /// Pointer-drag grid step; zero disables snapping
    #[serde(default = "default_grid_step")]
    pub grid_step: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            margin_factor: default_margin_factor(),
            collision_factor: default_collision_factor(),
            wall_offset: default_wall_offset(),
            wall_inset: default_wall_inset(),
            grid_step: default_grid_step(),
        }
    }
}

impl SolverConfig {
    pub fn grid_step(&self) -> Option<f32> {
        (self.grid_step > 0.0).then_some(self.grid_step)
    }
}

fn default_margin_factor() -> f32 {
    0.6
}
fn default_collision_factor() -> f32 {
    0.75
}
fn default_wall_offset() -> f32 {
    0.1
}
fn default_wall_inset() -> f32 {
    1.0
}
fn default_grid_step() -> f32 {
    0.25
}

/// Procedural layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Total margin subtracted from each room dimension to get the usable area
    #[serde(default = "default_edge_margin")]
    pub edge_margin: f32,
    /// Aisle between lecture rows
    #[serde(default = "default_row_gap")]
    pub row_gap: f32,
    /// Spacing between exam desks on both axes
    #[serde(default = "default_exam_gap")]
    pub exam_gap: f32,
    /// Gap added to the cluster diameter to get the group grid cell
    #[serde(default = "default_cluster_gap")]
    pub cluster_gap: f32,
    /// Distance between the circle and the nearest wall
    #[serde(default = "default_circle_inset")]
    pub circle_inset: f32,
    /// Smallest circle radius that still counts as a usable layout
    #[serde(default = "default_circle_min_radius")]
    pub circle_min_radius: f32,
    /// Containment slack allowed when validating a generated batch
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Presets are pulled inside `half - preset_inset` before solving
    #[serde(default = "default_preset_inset")]
    pub preset_inset: f32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            edge_margin: default_edge_margin(),
            row_gap: default_row_gap(),
            exam_gap: default_exam_gap(),
            cluster_gap: default_cluster_gap(),
            circle_inset: default_circle_inset(),
            circle_min_radius: default_circle_min_radius(),
            tolerance: default_tolerance(),
            preset_inset: default_preset_inset(),
        }
    }
}

fn default_edge_margin() -> f32 {
    0.4
}
fn default_row_gap() -> f32 {
    0.6
}
fn default_exam_gap() -> f32 {
    0.8
}
fn default_cluster_gap() -> f32 {
    0.3
}
fn default_circle_inset() -> f32 {
    1.0
}
fn default_circle_min_radius() -> f32 {
    1.5
}
fn default_tolerance() -> f32 {
    0.1
}
fn default_preset_inset() -> f32 {
    1.0
}

/// Accessibility and acoustic scoring settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Pair gaps below this are deliberate groupings and do not count
    #[serde(default = "default_grouping_tolerance")]
    pub grouping_tolerance: f32,
    /// Edge-to-wall distances below this count as flush
    #[serde(default = "default_near_wall_tolerance")]
    pub near_wall_tolerance: f32,
    /// Minimum comfortable passage width
    #[serde(default = "default_passage_width")]
    pub passage_width: f32,
    /// Reported minimum clearance when no pair qualifies
    #[serde(default = "default_min_clearance")]
    pub default_min_clearance: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            grouping_tolerance: default_grouping_tolerance(),
            near_wall_tolerance: default_near_wall_tolerance(),
            passage_width: default_passage_width(),
            default_min_clearance: default_min_clearance(),
        }
    }
}

fn default_grouping_tolerance() -> f32 {
    0.05
}
fn default_near_wall_tolerance() -> f32 {
    0.05
}
fn default_passage_width() -> f32 {
    0.7
}
fn default_min_clearance() -> f32 {
    10.0
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            wizard: WizardConfig::default(),
            scoring: ScoringConfig::default(),
            history_capacity: default_history_capacity(),
        }
    }
}

fn default_history_capacity() -> usize {
    20
}

impl EngineConfig {
    /// Load config with layered precedence: defaults < file < env vars
    ///
    /// An explicit `path` must exist; without one, `./furnish.toml` is used
    /// when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => {
                let local = PathBuf::from("furnish.toml");
                if local.exists() {
                    Self::load_file(&local)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a TOML string (no env overrides)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| FurnishError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            FurnishError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply `FURNISH_*` overrides from an environment-like iterator
    pub fn apply_overrides<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let target = match key.as_str() {
                "FURNISH_COLLISION_FACTOR" => &mut self.solver.collision_factor,
                "FURNISH_MARGIN_FACTOR" => &mut self.solver.margin_factor,
                "FURNISH_GRID_STEP" => &mut self.solver.grid_step,
                _ => continue,
            };
            *target = value.trim().parse().map_err(|_| {
                FurnishError::ConfigError(format!("{} must be a number, got '{}'", key, value))
            })?;
        }
        Ok(())
    }

    /// Check value ranges after all layers are merged
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("solver.margin_factor", self.solver.margin_factor),
            ("solver.collision_factor", self.solver.collision_factor),
            ("wizard.circle_min_radius", self.wizard.circle_min_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(FurnishError::ConfigError(format!(
                    "{} must be positive, got {}",
                    field, value
                )));
            }
        }

        let non_negative = [
            ("solver.wall_offset", self.solver.wall_offset),
            ("solver.wall_inset", self.solver.wall_inset),
            ("solver.grid_step", self.solver.grid_step),
            ("wizard.edge_margin", self.wizard.edge_margin),
            ("wizard.tolerance", self.wizard.tolerance),
            ("scoring.passage_width", self.scoring.passage_width),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(FurnishError::ConfigError(format!(
                    "{} must not be negative, got {}",
                    field, value
                )));
            }
        }

        if self.history_capacity == 0 {
            return Err(FurnishError::ConfigError(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_capacity, 20);
        assert!((config.solver.collision_factor - 0.75).abs() < f32::EPSILON);
        assert_eq!(config.solver.grid_step(), Some(0.25));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
[solver]
collision_factor = 0.4
grid_step = 0
"#,
        )
        .unwrap();
        assert!((config.solver.collision_factor - 0.4).abs() < f32::EPSILON);
        assert!((config.solver.margin_factor - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.solver.grid_step(), None);
        assert!((config.scoring.passage_width - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = EngineConfig::default();
        config
            .apply_overrides(vec![
                ("FURNISH_COLLISION_FACTOR".to_string(), "0.5".to_string()),
                ("UNRELATED".to_string(), "x".to_string()),
            ])
            .unwrap();
        assert!((config.solver.collision_factor - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bad_override_is_error() {
        let mut config = EngineConfig::default();
        let result = config.apply_overrides(vec![(
            "FURNISH_MARGIN_FACTOR".to_string(),
            "wide".to_string(),
        )]);
        assert!(matches!(result, Err(FurnishError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let result = EngineConfig::from_toml_str("history_capacity = 0");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = std::env::temp_dir().join(format!("furnish_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("furnish.toml");
        fs::write(&path, "[wizard]\nedge_margin = 0.8\n").unwrap();

        let config = EngineConfig::load(Some(&path)).unwrap();
        assert!((config.wizard.edge_margin - 0.8).abs() < f32::EPSILON);

        fs::remove_dir_all(&dir).ok();
    }
}
