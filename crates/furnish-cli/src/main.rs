//! Furnish CLI - Command-line interface for the furnish layout engine

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{catalog, preset, score, validate, wizard, Context};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "furnish")]
#[command(about = "Classroom furniture layout engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Engine config file (defaults to ./furnish.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List rooms, furniture types and presets
    Catalog {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Generate a procedural layout and emit it as a plan
    Wizard {
        /// Scenario (lecture, exam, groups, circle)
        scenario: String,

        /// Requested seats
        count: u32,

        /// Room id (defaults to the catalog's default room)
        #[arg(long)]
        room: Option<String>,

        /// Furniture type id overriding the scenario default
        #[arg(long = "type")]
        type_id: Option<u32>,

        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Plan format for stdout (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },

    /// Fit a catalog preset into a room and emit it as a plan
    Preset {
        /// Preset name
        name: String,

        /// Room id (defaults to the catalog's default room)
        #[arg(long)]
        room: Option<String>,

        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Plan format for stdout (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },

    /// Score a plan for clearance, wall passages and acoustics
    Score {
        /// Path to plan file
        plan: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check a plan for containment and collisions
    Validate {
        /// Path to plan file
        plan: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context::load(cli.config.as_deref(), cli.catalog.as_deref())?;

    match cli.command {
        Commands::Catalog { format } => catalog::run(&ctx, &format),
        Commands::Wizard {
            scenario,
            count,
            room,
            type_id,
            output,
            format,
        } => wizard::run(
            &ctx,
            wizard::WizardArgs {
                scenario,
                count,
                room,
                type_id,
                output,
                format,
            },
        ),
        Commands::Preset {
            name,
            room,
            output,
            format,
        } => preset::run(
            &ctx,
            preset::PresetArgs {
                name,
                room,
                output,
                format,
            },
        ),
        Commands::Score { plan, format } => score::run(&ctx, &plan, &format),
        Commands::Validate { plan, format } => validate::run(&ctx, &plan, &format),
    }
}
