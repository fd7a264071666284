//! Preset placement command

use super::{emit_plan, Context};
use anyhow::Result;
use std::path::PathBuf;

pub struct PresetArgs {
    pub name: String,
    pub room: Option<String>,
    pub output: Option<PathBuf>,
    pub format: String,
}

pub fn run(ctx: &Context, args: PresetArgs) -> Result<()> {
    let mut session = ctx.session(args.room.as_deref())?;
    let placed = session.load_preset(&args.name)?;
    eprintln!(
        "Preset '{}': {} item(s) fitted into '{}'",
        args.name,
        placed,
        session.room().id
    );

    emit_plan(&session, args.output.as_deref(), &args.format)
}
