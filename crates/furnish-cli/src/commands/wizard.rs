//! Procedural layout command

use super::{emit_plan, Context};
use anyhow::{anyhow, Result};
use furnish_core::{FurnitureTypeId, Scenario};
use furnish_layout::LayoutRequest;
use std::path::PathBuf;

pub struct WizardArgs {
    pub scenario: String,
    pub count: u32,
    pub room: Option<String>,
    pub type_id: Option<u32>,
    pub output: Option<PathBuf>,
    pub format: String,
}

pub fn run(ctx: &Context, args: WizardArgs) -> Result<()> {
    let scenario: Scenario = args.scenario.parse().map_err(|e: String| anyhow!(e))?;
    let mut request = LayoutRequest::new(scenario, args.count);
    if let Some(type_id) = args.type_id {
        request = request.with_type(FurnitureTypeId(type_id));
    }

    let mut session = ctx.session(args.room.as_deref())?;
    match session.apply_wizard(&request) {
        Ok(ids) => {
            eprintln!(
                "Placed {} item(s), {} seat(s) in '{}'",
                ids.len(),
                session.seat_total(),
                session.room().id
            );
        }
        Err(failure) => {
            eprintln!("Layout failed: {}", failure);
            std::process::exit(1);
        }
    }

    emit_plan(&session, args.output.as_deref(), &args.format)
}
