// menu.rs — `sg menu`: header menu entries for the configured layout.

use sg_week::{MenuAction, ProgressMenu};

use super::Context;

pub fn execute(ctx: &Context) -> anyhow::Result<()> {
    let menu = ProgressMenu::new(ctx.active.is_wide_layout());
    for (action, caption) in menu.entries() {
        let target = match action.route() {
            Some(route) => route,
            None => "(opens the share dialog)",
        };
        let command = match action {
            MenuAction::MyWeek => "sg week",
            MenuAction::ShareProgress => "-",
            MenuAction::WeeklyStatistics => "sg stats",
        };
        println!("{:<20} {:<26} {}", caption, target, command);
    }
    Ok(())
}
