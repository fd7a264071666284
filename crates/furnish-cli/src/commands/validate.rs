//! Plan validation command

use super::Context;
use anyhow::Result;
use furnish_constraint::{Severity, ValidationReport};
use std::path::Path;

pub fn run(ctx: &Context, plan: &Path, format: &str) -> Result<()> {
    let (session, _) = ctx.load_plan(plan)?;
    let report = session.validate();

    if format == "json" {
        print_report_json(&report)?;
    } else {
        print_report_text(&report);
    }

    if !report.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report_text(report: &ValidationReport) {
    if report.violations.is_empty() {
        println!("All placements passed.");
        return;
    }

    println!("{}", report.summary());
    println!();

    for violation in &report.violations {
        let severity_str = match violation.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        println!(
            "  [{}] {} ({}): {}",
            severity_str, violation.instance, violation.rule, violation.message
        );
    }
}

fn print_report_json(report: &ValidationReport) -> Result<()> {
    let output = serde_json::json!({
        "valid": report.is_valid(),
        "summary": report.summary(),
        "errors": report.error_count(),
        "warnings": report.warning_count(),
        "violations": report.violations,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
