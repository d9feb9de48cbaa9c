// board_flow.rs — End-to-end flow across week navigation and the goal board.
//
// A page-like caller owns the active week and the board. It implements
// NavigationHandler, so the navigator's intents move the reference date,
// the active week is re-derived, and the board is re-keyed to that week.
//
// VERIFY:
//   - goals land in the partition of the effective week
//   - navigating away and back shows the same goals in the same order
//   - narrow layouts re-anchor on the reference day
//   - Team scope merges users; the scope setter runs on every selection
//   - delete shows the toast and the activity log records every mutation

use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use sg_goal::{
    BoardEvent, EventDispatcher, GoalBoard, GoalForm, GoalQuery, GoalStore, JsonGoalStore,
    JsonlSink, Selection, ToastQueue, WeekStats,
};
use sg_week::{
    render_label, ActiveWeek, NavIntent, NavigationHandler, ViewScope, WeekNavigation, WeekStart,
};

struct Page {
    active: ActiveWeek,
    board: GoalBoard<JsonGoalStore, ToastQueue>,
    scope_calls: usize,
}

impl Page {
    fn sync_week(&mut self) {
        let key = self.active.key();
        self.board.set_week(key);
    }
}

impl NavigationHandler for Page {
    fn on_previous_week(&mut self) {
        self.active.navigate(NavIntent::Previous);
        self.sync_week();
    }

    fn on_next_week(&mut self) {
        self.active.navigate(NavIntent::Next);
        self.sync_week();
    }

    fn set_scope(&mut self, scope: ViewScope) {
        self.scope_calls += 1;
        self.board.set_scope(scope);
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn texts(board: &GoalBoard<JsonGoalStore, ToastQueue>) -> Vec<String> {
    board.goals().unwrap().into_iter().map(|g| g.text).collect()
}

#[test]
fn week_navigation_and_goal_editing() {
    let dir = tempdir().unwrap();
    let events_path = dir.path().join("events.jsonl");

    let mut events = EventDispatcher::new();
    events.add_sink(Box::new(JsonlSink::new(&events_path)));

    // Tuesday 2024-02-27, wide layout: parent week cursor is 2024-02-25.
    let active = ActiveWeek::anchored_on(date(2024, 2, 27), true, WeekStart::Sunday);
    let store = JsonGoalStore::new(dir.path().join("goals")).unwrap();
    let board = GoalBoard::new(store, ToastQueue::new(), GoalQuery::new("alice", active.key()))
        .with_events(events);

    let mut nav = WeekNavigation::new(
        active.key(),
        ViewScope::Me,
        Page {
            active,
            board,
            scope_calls: 0,
        },
    );
    assert_eq!(nav.label().to_string(), "Feb - Mar 2024");

    // Create two goals in the transition week.
    {
        let board = &mut nav.handler_mut().board;
        board.open_new();
        board.submit(GoalForm::new("Ship v2", "cut the release", "#FFD700")).unwrap();
        board.open_new();
        board.submit(GoalForm::new("Write docs", "", "#87CEFA")).unwrap();
        board.open_new();
        board.submit(GoalForm::new("", "ignored", "")).unwrap();
        assert_eq!(texts(board), vec!["Ship v2", "Write docs"]);
    }

    // Next week is empty and fully inside March.
    nav.next();
    let key = nav.handler().active.key();
    nav.set_week_start(key);
    assert_eq!(key.to_string(), "2024-03-03");
    assert_eq!(nav.label().to_string(), "Mar 2024");
    assert!(texts(&nav.handler().board).is_empty());

    // Back again: same goals, same order.
    nav.previous();
    let key = nav.handler().active.key();
    nav.set_week_start(key);
    assert_eq!(texts(&nav.handler().board), vec!["Ship v2", "Write docs"]);

    // Complete and then delete the first goal.
    {
        let board = &mut nav.handler_mut().board;
        let first = board.goals().unwrap()[0].clone();
        board.open_goal(&first);
        board.toggle_complete().unwrap();
        assert!(board.staged().unwrap().completed);
        board.close();

        let stats = WeekStats::from_goals(&board.goals().unwrap());
        assert_eq!((stats.total, stats.completed, stats.percent_complete), (2, 1, 50));

        board.open_goal(&first);
        board.delete().unwrap();
        assert_eq!(board.selection(), &Selection::Closed);
        assert_eq!(texts(board), vec!["Write docs"]);

        let toasts: Vec<_> = board.notifier().visible().map(|t| t.toast.title.clone()).collect();
        assert_eq!(toasts, vec!["Goal deleted."]);
    }

    // Team scope: bob's goal for the same week shows up; selecting twice calls twice.
    {
        let mut bobs_store = JsonGoalStore::new(dir.path().join("goals")).unwrap();
        let bob = GoalQuery::new("bob", nav.handler().board.query().week);
        bobs_store.set_pending_text("Review PRs");
        bobs_store.add(&bob, "", &"#20B2AA".into()).unwrap();
    }
    nav.select_scope(ViewScope::Team);
    nav.select_scope(ViewScope::Team);
    assert_eq!(nav.handler().scope_calls, 2);
    assert_eq!(nav.active_scope(), ViewScope::Team);
    let mut team = texts(&nav.handler().board);
    team.sort();
    assert_eq!(team, vec!["Review PRs", "Write docs"]);

    // Activity log: 2 created, 1 toggled, 1 deleted, 2 scope changes.
    let log = fs::read_to_string(&events_path).unwrap();
    let kinds: Vec<String> = log
        .lines()
        .map(|line| {
            serde_json::from_str::<BoardEvent>(line)
                .unwrap()
                .event_type()
                .to_string()
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "goal_created",
            "goal_created",
            "goal_completion_toggled",
            "goal_deleted",
            "scope_changed",
            "scope_changed",
        ]
    );
}

#[test]
fn narrow_layout_follows_reference_day_not_parent_cursor() {
    let dir = tempdir().unwrap();

    // The parent cursor points at a week in January; the narrow layout ignores it.
    let parent = "2024-01-07".parse().unwrap();
    let mut active = ActiveWeek::new(date(2024, 3, 6), false, parent, WeekStart::Sunday);
    assert_eq!(active.key().to_string(), "2024-03-03");

    let store = JsonGoalStore::new(dir.path()).unwrap();
    let mut board = GoalBoard::new(store, ToastQueue::new(), GoalQuery::new("alice", active.key()));
    board.open_new();
    board.submit(GoalForm::new("Mobile goal", "", "")).unwrap();
    assert!(dir.path().join("alice/2024-03-03.json").exists());

    // Widening the layout switches to the parent cursor's week.
    board.set_week(active.set_wide_layout(true));
    assert!(board.goals().unwrap().is_empty());
    assert_eq!(render_label(board.query().week).to_string(), "Jan 2024");
}
