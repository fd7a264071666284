//! Accessibility scoring command

use super::Context;
use anyhow::Result;
use std::path::Path;

pub fn run(ctx: &Context, plan: &Path, format: &str) -> Result<()> {
    let (mut session, _) = ctx.load_plan(plan)?;
    let report = session.report();

    if format == "json" {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{}", report.summary());
    if report.qualifying_pairs == 0 {
        println!("  No spaced pairs; minimum clearance is the default.");
    }
    for issue in &report.wall_issues {
        println!(
            "  [WARN ] {} is {:.2} m from the {:?} wall: too narrow to pass",
            issue.instance, issue.distance, issue.wall
        );
    }

    Ok(())
}
