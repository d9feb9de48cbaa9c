// week.rs — `sg week`: the active week, optionally moved by --offset.

use sg_week::{
    render_label, ActiveWeek, NavIntent, NavigationHandler, ViewScope, WeekKey, WeekNavigation,
};

use super::Context;

/// Owns the reference date; moves it one week per navigator intent.
struct WeekCursor {
    active: ActiveWeek,
    scope: ViewScope,
}

impl NavigationHandler for WeekCursor {
    fn on_previous_week(&mut self) {
        self.active.navigate(NavIntent::Previous);
    }

    fn on_next_week(&mut self) {
        self.active.navigate(NavIntent::Next);
    }

    fn set_scope(&mut self, scope: ViewScope) {
        self.scope = scope;
    }
}

pub fn execute(ctx: &Context, week_start: Option<WeekKey>, offset: i64) -> anyhow::Result<()> {
    let nav = navigate(ctx.active.clone(), week_start, offset);
    let label = nav.label();
    let key = nav.week_start();
    let cursor = nav.into_handler();

    println!("{}", label);
    println!("  Week:      {} to {}", key, key.end());
    println!("  Reference: {}", cursor.active.reference_day());
    println!(
        "  Layout:    {}",
        if cursor.active.is_wide_layout() { "wide" } else { "narrow" }
    );
    println!("  First day: {}", cursor.active.week_start());
    println!("  Viewing:   {} ({})", cursor.scope.tab_label(), ctx.config.user);
    Ok(())
}

fn navigate(active: ActiveWeek, week_start: Option<WeekKey>, offset: i64) -> WeekNavigation<WeekCursor> {
    let mut nav = WeekNavigation::new(
        active.key(),
        ViewScope::Me,
        WeekCursor {
            active,
            scope: ViewScope::Me,
        },
    );
    if let Some(start) = week_start {
        let key = nav.handler_mut().active.set_explicit_week_start(start);
        nav.set_week_start(key);
    }

    let intent = if offset < 0 { NavIntent::Previous } else { NavIntent::Next };
    for _ in 0..offset.unsigned_abs() {
        nav.dispatch(intent);
        let key = nav.handler().active.key();
        nav.set_week_start(key);
    }
    tracing::debug!(offset, week = %nav.week_start(), label = %render_label(nav.week_start()), "week resolved");
    nav
}
