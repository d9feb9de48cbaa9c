// stats.rs — `sg stats`: completion statistics for the active week.

use sg_goal::{stats_by_owner, WeekStats};
use sg_week::{render_label, ViewScope};

use super::{truncate, Context};

pub fn execute(ctx: &Context, team: bool) -> anyhow::Result<()> {
    let scope = if team { ViewScope::Team } else { ViewScope::Me };
    let board = ctx.board(scope)?;
    let goals = board.goals()?;
    let week = board.query().week;

    let overall = WeekStats::from_goals(&goals);
    println!("Weekly Statistics: {} (week of {})", render_label(week), week);
    println!(
        "  {} of {} goals completed ({}%), {} open",
        overall.completed, overall.total, overall.percent_complete, overall.open
    );

    if team && !goals.is_empty() {
        println!();
        println!("{:<20} {:>6} {:>6} {:>5}", "OWNER", "DONE", "TOTAL", "%");
        println!("{}", "-".repeat(40));
        for (owner, stats) in stats_by_owner(&goals) {
            println!(
                "{:<20} {:>6} {:>6} {:>5}",
                truncate(&owner, 20),
                stats.completed,
                stats.total,
                stats.percent_complete
            );
        }
    }

    Ok(())
}
