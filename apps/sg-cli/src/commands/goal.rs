// goal.rs — Goal subcommands: list, add, edit, complete, delete, palette.
//
// Each command drives the board the way the editor would: open, stage,
// submit or act, close.

use anyhow::bail;
use clap::Subcommand;
use sg_goal::{Goal, GoalForm, Swatch, BOARD_HEADING};
use sg_week::{render_label, ViewScope};

use super::{truncate, Context};

#[derive(Subcommand)]
pub enum GoalCommands {
    /// List the active week's goals.
    List {
        /// Include every team member's goals.
        #[arg(long)]
        team: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Create a goal in the active week.
    Add {
        /// Goal text (e.g., "Ship v2"). Empty text creates nothing.
        text: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Swatch color, e.g. "#FFD700" (see `sg goal palette`).
        #[arg(long, default_value = "")]
        color: String,
    },
    /// Edit a goal's text, description, or color.
    Edit {
        /// Goal ID (or a unique prefix).
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Toggle a goal's completion.
    Complete {
        /// Goal ID (or a unique prefix).
        id: String,
    },
    /// Delete a goal.
    Delete {
        /// Goal ID (or a unique prefix).
        id: String,
    },
    /// List the swatch palette.
    Palette,
}

pub fn execute(cmd: &GoalCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        GoalCommands::List { team, json } => list_goals(ctx, *team, *json),
        GoalCommands::Add {
            text,
            description,
            color,
        } => add_goal(ctx, text, description, color),
        GoalCommands::Edit {
            id,
            text,
            description,
            color,
        } => edit_goal(ctx, id, text.as_deref(), description.as_deref(), color.as_deref()),
        GoalCommands::Complete { id } => complete_goal(ctx, id),
        GoalCommands::Delete { id } => delete_goal(ctx, id),
        GoalCommands::Palette => show_palette(),
    }
}

fn scope_for(team: bool) -> ViewScope {
    if team {
        ViewScope::Team
    } else {
        ViewScope::Me
    }
}

fn list_goals(ctx: &Context, team: bool, json: bool) -> anyhow::Result<()> {
    let board = ctx.board(scope_for(team))?;
    let goals = board.goals()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&goals)?);
        return Ok(());
    }

    let week = board.query().week;
    println!("{} {} (week of {})", BOARD_HEADING, render_label(week), week);

    if goals.is_empty() {
        println!("No goals for this week.");
        return Ok(());
    }

    println!(
        "{:<38} {:<30} {:<6} {:<9} {:<12}",
        "ID", "TEXT", "DONE", "COLOR", "OWNER"
    );
    println!("{}", "-".repeat(99));

    for g in &goals {
        println!(
            "{:<38} {:<30} {:<6} {:<9} {:<12}",
            g.id,
            truncate(&g.text, 28),
            if g.completed { "yes" } else { "" },
            g.color.display_color(),
            truncate(&g.owner, 12),
        );
    }

    Ok(())
}

fn add_goal(ctx: &Context, text: &str, description: &str, color: &str) -> anyhow::Result<()> {
    let mut board = ctx.board(ViewScope::Me)?;
    let before = board.goals()?.len();

    board.open_new();
    board.submit(GoalForm::new(text, description, color))?;

    let goals = board.goals()?;
    if goals.len() == before {
        return nothing_created(text);
    }
    if let Some(goal) = goals.last() {
        println!("Goal created: {}", goal.id);
        println!("  Text: {}", goal.text);
        println!("  Week: {}", goal.week);
        if !goal.color.is_empty() && !goal.color.is_in_palette() {
            println!("  Note: {} is not a palette swatch; stored as given.", goal.color);
        }
    }
    Ok(())
}

/// An empty text is a silent no-op; anything else means the store refused the goal.
fn nothing_created(text: &str) -> anyhow::Result<()> {
    if text.is_empty() {
        println!("Nothing created: goal text is empty.");
        return Ok(());
    }
    bail!("goal '{}' was not created; see the log for the store error", text)
}

fn edit_goal(
    ctx: &Context,
    id: &str,
    text: Option<&str>,
    description: Option<&str>,
    color: Option<&str>,
) -> anyhow::Result<()> {
    let mut board = ctx.board(ViewScope::Me)?;
    let goal = find_goal(&board.goals()?, id)?;

    board.open_goal(&goal);
    let mut form = match board.staged() {
        Some(staged) => staged.form_defaults(),
        None => bail!("editor did not open for goal {}", goal.id),
    };
    if let Some(text) = text {
        form.text = text.to_string();
    }
    if let Some(description) = description {
        form.description = description.to_string();
    }
    if let Some(color) = color {
        form.color = Swatch::new(color);
    }
    board.submit(form)?;

    println!("Goal updated: {}", goal.id);
    Ok(())
}

fn complete_goal(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let mut board = ctx.board(ViewScope::Me)?;
    let goal = find_goal(&board.goals()?, id)?;

    board.open_goal(&goal);
    board.toggle_complete()?;
    let completed = board.staged().is_some_and(|s| s.completed);
    board.close();

    if completed {
        println!("Goal completed: {}", goal.text);
    } else {
        println!("Goal reopened: {}", goal.text);
    }
    Ok(())
}

fn delete_goal(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let mut board = ctx.board(ViewScope::Me)?;
    let goal = find_goal(&board.goals()?, id)?;

    board.open_goal(&goal);
    board.delete()?;
    Ok(())
}

fn show_palette() -> anyhow::Result<()> {
    for swatch in Swatch::palette() {
        println!("{}", swatch);
    }
    Ok(())
}

/// Resolve a goal by exact id or unique id prefix.
fn find_goal(goals: &[Goal], id: &str) -> anyhow::Result<Goal> {
    if let Some(goal) = goals.iter().find(|g| g.id == id) {
        return Ok(goal.clone());
    }
    let matches: Vec<&Goal> = goals.iter().filter(|g| g.id.starts_with(id)).collect();
    match matches.as_slice() {
        [goal] => Ok((*goal).clone()),
        [] => bail!("no goal matching '{}' in this week", id),
        _ => bail!("'{}' matches {} goals; use a longer prefix", id, matches.len()),
    }
}
