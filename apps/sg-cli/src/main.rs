//! # sg-cli
//!
//! Command-line front-end for the Sprint Goals weekly board:
//! - `sg week`: the active week and its label, with `--offset` navigation
//! - `sg goal list/add/edit/complete/delete/palette`: manage the week's goals
//! - `sg stats`: weekly completion statistics
//! - `sg menu`: header menu entries for the current layout

mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sg_week::{WeekKey, WeekStart};
use tracing_subscriber::EnvFilter;

use commands::Context;

/// Sprint Goals: plan and track goals week by week.
#[derive(Parser)]
#[command(name = "sg", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".", global = true)]
    project_root: PathBuf,

    /// Act as this user (overrides the config file).
    #[arg(long, global = true)]
    user: Option<String>,

    /// Reference day as YYYY-MM-DD (defaults to today).
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Use the narrow layout: the week always follows the reference day.
    #[arg(long, global = true)]
    narrow: bool,

    /// First day of the week: sunday or monday.
    #[arg(long, global = true)]
    first_day: Option<WeekStart>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active week.
    Week {
        /// Parent-supplied week start (YYYY-MM-DD), used by the wide layout.
        #[arg(long)]
        week_start: Option<WeekKey>,
        /// Weeks to move from the active week (negative goes back).
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
    /// Manage the week's goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Show weekly completion statistics.
    Stats {
        /// Include every team member's goals.
        #[arg(long)]
        team: bool,
    },
    /// Show the header menu for the current layout.
    Menu,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sg_cli=info".parse()?)
                .add_directive("sg_goal=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let ctx = Context::new(&project_root, cli.user, cli.date, cli.narrow, cli.first_day)?;

    match &cli.command {
        Commands::Week { week_start, offset } => commands::week::execute(&ctx, *week_start, *offset),
        Commands::Goal { command } => commands::goal::execute(command, &ctx),
        Commands::Stats { team } => commands::stats::execute(&ctx, *team),
        Commands::Menu => commands::menu::execute(&ctx),
    }
}
