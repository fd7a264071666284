//! CLI command implementations

pub mod catalog;
pub mod preset;
pub mod score;
pub mod validate;
pub mod wizard;

use anyhow::{anyhow, Context as _, Result};
use furnish_core::{Catalog, EngineConfig, RoomId};
use furnish_scene::{save_plan_string, PlanFormat};
use furnish_session::{LoadSummary, Session};
use std::path::Path;

/// Catalog and config shared by every command
pub struct Context {
    pub catalog: Catalog,
    pub config: EngineConfig,
}

impl Context {
    pub fn load(config: Option<&Path>, catalog: Option<&Path>) -> Result<Self> {
        let config = EngineConfig::load(config).context("Failed to load engine config")?;
        let catalog = match catalog {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            None => Catalog::builtin()?,
        };
        tracing::debug!(
            "catalog: {} room(s), {} furniture type(s)",
            catalog.rooms().count(),
            catalog.furniture_types().count()
        );
        Ok(Self { catalog, config })
    }

    /// Open a session in `room`, or the catalog's default room
    pub fn session(&self, room: Option<&str>) -> Result<Session> {
        let room = room
            .map(RoomId::from)
            .unwrap_or_else(|| self.catalog.default_room().clone());
        Ok(Session::with_room(
            self.catalog.clone(),
            self.config.clone(),
            &room,
        )?)
    }

    /// Open a session and load a plan file into it
    pub fn load_plan(&self, plan: &Path) -> Result<(Session, LoadSummary)> {
        let mut session = self.session(None)?;
        let summary = session
            .load_plan(plan)
            .with_context(|| format!("Failed to load plan {}", plan.display()))?;

        if let Some(room) = &summary.unknown_room {
            eprintln!(
                "Warning: plan room '{}' is not in the catalog; using '{}'",
                room, summary.room
            );
        }
        for skipped in &summary.skipped {
            eprintln!("Warning: item {} skipped: {}", skipped.index, skipped.reason);
        }
        Ok((session, summary))
    }
}

/// Write the session's plan to `output`, or print it in `format`
pub fn emit_plan(session: &Session, output: Option<&Path>, format: &str) -> Result<()> {
    match output {
        Some(path) => {
            session.save_plan(path)?;
            println!(
                "Saved {} item(s) for room '{}' to {}",
                session.registry().len(),
                session.room().id,
                path.display()
            );
        }
        None => {
            let format: PlanFormat = format.parse().map_err(|e: String| anyhow!(e))?;
            print!("{}", save_plan_string(&session.plan(), format)?);
        }
    }
    Ok(())
}
