// board.rs — GoalBoard: the weekly board and its goal editor.
//
// The editor is a small state machine:
//
//   Closed ──open_new / open_goal──▶ Editing(SelectionState)
//   Editing ──submit / delete / close──▶ Closed
//   Editing(existing) ──toggle_complete──▶ Editing(existing, completed flipped)
//
// Store mutations are fire-and-forget. The board never waits for the list
// to catch up and never keeps the editor open because a store call failed:
// the failure is logged and the transition happens anyway.

use sg_week::{ViewScope, WeekKey};

use crate::error::GoalError;
use crate::events::{BoardEvent, EventDispatcher};
use crate::goal::{Goal, Swatch};
use crate::notify::{Notifier, Toast};
use crate::store::{GoalQuery, GoalStore};

/// Heading shown above the goal grid.
pub const BOARD_HEADING: &str = "Sprint Goals:";

/// Values submitted from the editor form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalForm {
    pub text: String,
    pub description: String,
    pub color: Swatch,
}

impl GoalForm {
    pub fn new(text: impl Into<String>, description: impl Into<String>, color: impl Into<Swatch>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
            color: color.into(),
        }
    }
}

/// What the editor is staging.
///
/// `goal_id == None` means a new goal is being created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub goal_id: Option<String>,
    pub text: String,
    pub description: String,
    pub color: Swatch,
    pub completed: bool,
}

impl SelectionState {
    fn from_goal(goal: &Goal) -> Self {
        Self {
            goal_id: Some(goal.id.clone()),
            text: goal.text.clone(),
            description: goal.description.clone(),
            color: goal.color.clone(),
            completed: goal.completed,
        }
    }

    pub fn is_new(&self) -> bool {
        self.goal_id.is_none()
    }

    /// Initial form values for this selection.
    pub fn form_defaults(&self) -> GoalForm {
        GoalForm {
            text: self.text.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
        }
    }
}

/// Editor state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Closed,
    Editing(SelectionState),
}

/// The weekly goal board, bound to a store, a notifier, and a query.
pub struct GoalBoard<S, N> {
    store: S,
    notifier: N,
    events: EventDispatcher,
    query: GoalQuery,
    selection: Selection,
}

impl<S: GoalStore, N: Notifier> GoalBoard<S, N> {
    pub fn new(store: S, notifier: N, query: GoalQuery) -> Self {
        Self {
            store,
            notifier,
            events: EventDispatcher::new(),
            query,
            selection: Selection::Closed,
        }
    }

    /// Attach an event dispatcher (replaces the empty default).
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn query(&self) -> &GoalQuery {
        &self.query
    }

    /// Re-key the board. The editor state is left alone.
    pub fn set_query(&mut self, query: GoalQuery) {
        tracing::debug!(user = %query.user, week = %query.week, scope = %query.scope, "board re-keyed");
        self.query = query;
    }

    pub fn set_week(&mut self, week: WeekKey) {
        let query = GoalQuery { week, ..self.query.clone() };
        self.set_query(query);
    }

    /// Switch scope. Always emits, even when `scope` is already active.
    pub fn set_scope(&mut self, scope: ViewScope) {
        let query = self.query.clone().with_scope(scope);
        self.set_query(query);
        self.events
            .dispatch(&BoardEvent::scope_changed(&self.query.user, self.query.week, scope));
    }

    /// Goals for the current query, as the store reports them now.
    pub fn goals(&self) -> Result<Vec<Goal>, GoalError> {
        self.store.list(&self.query)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_open(&self) -> bool {
        matches!(self.selection, Selection::Editing(_))
    }

    /// Staged values while editing.
    pub fn staged(&self) -> Option<&SelectionState> {
        match &self.selection {
            Selection::Editing(state) => Some(state),
            Selection::Closed => None,
        }
    }

    /// Editor heading: "Edit Goal" or "Create New Goal".
    pub fn drawer_title(&self) -> Option<&'static str> {
        self.staged()
            .map(|s| if s.is_new() { "Create New Goal" } else { "Edit Goal" })
    }

    /// Submit button caption: "Update" or "Create".
    pub fn submit_label(&self) -> Option<&'static str> {
        self.staged()
            .map(|s| if s.is_new() { "Create" } else { "Update" })
    }

    /// Open the editor on a blank goal, discarding whatever was staged.
    pub fn open_new(&mut self) {
        tracing::debug!("editor opened for a new goal");
        self.selection = Selection::Editing(SelectionState::default());
    }

    /// Open the editor on `goal`, discarding whatever was staged.
    pub fn open_goal(&mut self, goal: &Goal) {
        tracing::debug!(goal_id = %goal.id, "editor opened for existing goal");
        self.selection = Selection::Editing(SelectionState::from_goal(goal));
    }

    /// Close the editor without touching the store.
    pub fn close(&mut self) {
        self.selection = Selection::Closed;
    }

    /// Submit the editor form.
    ///
    /// Existing goals are updated. New goals are created only when the
    /// submitted text is non-empty. Either way the editor closes.
    pub fn submit(&mut self, form: GoalForm) -> Result<(), GoalError> {
        let staged = match std::mem::take(&mut self.selection) {
            Selection::Editing(state) => state,
            Selection::Closed => return Err(GoalError::EditorClosed),
        };

        self.store.set_pending_text(&form.text);

        match staged.goal_id {
            Some(id) => match self.store.update(&id, &form.text, &form.description, &form.color) {
                Ok(()) => {
                    tracing::info!(goal_id = %id, "goal updated");
                    self.events.dispatch(&BoardEvent::goal_updated(&id, &form.text));
                }
                Err(e) => tracing::warn!(goal_id = %id, "goal update failed: {}", e),
            },
            None if !form.text.is_empty() => {
                match self.store.add(&self.query, &form.description, &form.color) {
                    Ok(goal) => {
                        tracing::info!(goal_id = %goal.id, week = %goal.week, "goal created");
                        self.events.dispatch(&BoardEvent::goal_created(&goal));
                    }
                    Err(e) => tracing::warn!(week = %self.query.week, "goal creation failed: {}", e),
                }
            }
            None => tracing::debug!("empty goal text submitted; nothing created"),
        }

        Ok(())
    }

    /// Flip completion of the goal being edited. The editor stays open.
    pub fn toggle_complete(&mut self) -> Result<(), GoalError> {
        let staged = match &mut self.selection {
            Selection::Editing(state) => state,
            Selection::Closed => return Err(GoalError::NoGoalSelected { action: "complete" }),
        };
        let id = staged
            .goal_id
            .clone()
            .ok_or(GoalError::NoGoalSelected { action: "complete" })?;

        match self.store.toggle_complete(&id) {
            Ok(completed) => {
                tracing::info!(goal_id = %id, completed, "goal completion toggled");
                self.events.dispatch(&BoardEvent::completion_toggled(&id, completed));
            }
            Err(e) => tracing::warn!(goal_id = %id, "goal completion toggle failed: {}", e),
        }
        staged.completed = !staged.completed;
        Ok(())
    }

    /// Delete the goal being edited, confirm with a toast, and close.
    pub fn delete(&mut self) -> Result<(), GoalError> {
        let id = match &self.selection {
            Selection::Editing(SelectionState {
                goal_id: Some(id), ..
            }) => id.clone(),
            _ => return Err(GoalError::NoGoalSelected { action: "delete" }),
        };

        match self.store.delete(&id) {
            Ok(()) => {
                tracing::info!(goal_id = %id, "goal deleted");
                self.events.dispatch(&BoardEvent::goal_deleted(&id));
            }
            Err(e) => tracing::warn!(goal_id = %id, "goal delete failed: {}", e),
        }
        self.notifier.notify(Toast::goal_deleted());
        self.selection = Selection::Closed;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryGoalStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store call as seen by the fake.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        SetPending(String),
        Add { description: String, color: String },
        Update { id: String, text: String },
        Toggle(String),
        Delete(String),
    }

    /// Records every call and delegates to an in-memory store.
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryGoalStore,
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl RecordingStore {
        fn seeded(goals: Vec<Goal>) -> Self {
            Self {
                inner: MemoryGoalStore::with_goals(goals),
                calls: Rc::default(),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.borrow().iter().filter(|c| pred(c)).count()
        }
    }

    impl GoalStore for RecordingStore {
        fn list(&self, query: &GoalQuery) -> Result<Vec<Goal>, GoalError> {
            self.inner.list(query)
        }

        fn pending_text(&self) -> &str {
            self.inner.pending_text()
        }

        fn set_pending_text(&mut self, text: &str) {
            self.calls.borrow_mut().push(Call::SetPending(text.to_string()));
            self.inner.set_pending_text(text);
        }

        fn add(&mut self, query: &GoalQuery, description: &str, color: &Swatch) -> Result<Goal, GoalError> {
            self.calls.borrow_mut().push(Call::Add {
                description: description.to_string(),
                color: color.to_string(),
            });
            self.inner.add(query, description, color)
        }

        fn update(&mut self, id: &str, text: &str, description: &str, color: &Swatch) -> Result<(), GoalError> {
            self.calls.borrow_mut().push(Call::Update {
                id: id.to_string(),
                text: text.to_string(),
            });
            self.inner.update(id, text, description, color)
        }

        fn toggle_complete(&mut self, id: &str) -> Result<bool, GoalError> {
            self.calls.borrow_mut().push(Call::Toggle(id.to_string()));
            self.inner.toggle_complete(id)
        }

        fn delete(&mut self, id: &str) -> Result<(), GoalError> {
            self.calls.borrow_mut().push(Call::Delete(id.to_string()));
            self.inner.delete(id)
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        shown: Vec<Toast>,
    }

    impl Notifier for FakeNotifier {
        fn notify(&mut self, toast: Toast) {
            self.shown.push(toast);
        }
    }

    fn week() -> WeekKey {
        "2024-03-03".parse().unwrap()
    }

    fn g1() -> Goal {
        let mut goal = Goal::new("alice", week(), "Ship v2", "cut the release", Swatch::from("#FFD700"));
        goal.id = "g1".to_string();
        goal
    }

    fn board_with(goals: Vec<Goal>) -> GoalBoard<RecordingStore, FakeNotifier> {
        GoalBoard::new(
            RecordingStore::seeded(goals),
            FakeNotifier::default(),
            GoalQuery::new("alice", week()),
        )
    }

    #[test]
    fn starts_closed() {
        let board = board_with(vec![]);
        assert_eq!(board.selection(), &Selection::Closed);
        assert!(board.drawer_title().is_none());
    }

    #[test]
    fn open_new_stages_empty_fields() {
        let mut board = board_with(vec![]);
        board.open_new();
        let staged = board.staged().unwrap();
        assert_eq!(staged, &SelectionState::default());
        assert_eq!(board.drawer_title(), Some("Create New Goal"));
        assert_eq!(board.submit_label(), Some("Create"));
    }

    #[test]
    fn open_goal_populates_from_goal() {
        let mut board = board_with(vec![g1()]);
        board.open_goal(&g1());
        let staged = board.staged().unwrap();
        assert_eq!(staged.goal_id.as_deref(), Some("g1"));
        assert_eq!(staged.text, "Ship v2");
        assert_eq!(staged.description, "cut the release");
        assert_eq!(staged.color.as_str(), "#FFD700");
        assert!(!staged.completed);
        assert_eq!(staged.form_defaults().text, "Ship v2");
        assert_eq!(board.drawer_title(), Some("Edit Goal"));
        assert_eq!(board.submit_label(), Some("Update"));
    }

    #[test]
    fn opening_again_replaces_staged_state() {
        let mut board = board_with(vec![g1()]);
        board.open_goal(&g1());
        board.open_new();
        assert!(board.staged().unwrap().is_new());
        assert_eq!(board.staged().unwrap().text, "");
    }

    #[test]
    fn submit_new_with_text_stages_then_adds() {
        let mut board = board_with(vec![]);
        board.open_new();
        board
            .submit(GoalForm::new("Write docs", "for the API", "#3CB371"))
            .unwrap();

        assert_eq!(
            board.store().calls(),
            vec![
                Call::SetPending("Write docs".to_string()),
                Call::Add {
                    description: "for the API".to_string(),
                    color: "#3CB371".to_string(),
                },
            ]
        );
        assert_eq!(board.selection(), &Selection::Closed);

        let goals = board.goals().unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].text, "Write docs");
        assert_eq!(goals[0].owner, "alice");
        assert_eq!(goals[0].week, week());
    }

    #[test]
    fn submit_new_with_empty_text_adds_nothing_but_closes() {
        let mut board = board_with(vec![]);
        board.open_new();
        board.submit(GoalForm::new("", "details only", "#FFD700")).unwrap();

        assert_eq!(board.store().count(|c| matches!(c, Call::Add { .. })), 0);
        assert_eq!(board.selection(), &Selection::Closed);
        assert!(board.goals().unwrap().is_empty());
    }

    #[test]
    fn submit_existing_updates_even_with_empty_text() {
        let mut board = board_with(vec![g1()]);
        board.open_goal(&g1());
        board.submit(GoalForm::new("", "", "#FFD700")).unwrap();

        assert_eq!(
            board.store().count(|c| matches!(c, Call::Update { id, text } if id == "g1" && text.is_empty())),
            1
        );
        assert_eq!(board.store().count(|c| matches!(c, Call::Add { .. })), 0);
        assert_eq!(board.selection(), &Selection::Closed);
    }

    #[test]
    fn submit_while_closed_is_rejected() {
        let mut board = board_with(vec![]);
        let result = board.submit(GoalForm::new("x", "", ""));
        assert!(matches!(result, Err(GoalError::EditorClosed)));
        assert!(board.store().calls().is_empty());
    }

    #[test]
    fn toggle_calls_store_once_and_keeps_editor_open() {
        let mut board = board_with(vec![g1()]);
        board.open_goal(&g1());
        board.toggle_complete().unwrap();

        assert_eq!(board.store().calls(), vec![Call::Toggle("g1".to_string())]);
        let staged = board.staged().unwrap();
        assert_eq!(staged.goal_id.as_deref(), Some("g1"));
        assert!(staged.completed);
        assert!(board.goals().unwrap()[0].completed);
    }

    #[test]
    fn toggle_requires_existing_goal() {
        let mut board = board_with(vec![]);
        assert!(matches!(
            board.toggle_complete(),
            Err(GoalError::NoGoalSelected { .. })
        ));
        board.open_new();
        assert!(matches!(
            board.toggle_complete(),
            Err(GoalError::NoGoalSelected { .. })
        ));
        assert!(board.store().calls().is_empty());
        assert!(board.is_open());
    }

    #[test]
    fn toggle_flips_staged_flag_even_when_store_fails() {
        // "g1" was never stored, so the store rejects the toggle.
        let mut board = board_with(vec![]);
        board.open_goal(&g1());
        board.toggle_complete().unwrap();

        assert_eq!(board.store().calls(), vec![Call::Toggle("g1".to_string())]);
        assert!(board.is_open());
        assert!(board.staged().unwrap().completed);

        board.toggle_complete().unwrap();
        assert!(!board.staged().unwrap().completed);
        assert_eq!(board.store().count(|c| matches!(c, Call::Toggle(_))), 2);
    }

    #[test]
    fn delete_calls_store_once_notifies_and_closes() {
        let mut board = board_with(vec![g1()]);
        board.open_goal(&g1());
        board.delete().unwrap();

        assert_eq!(board.store().calls(), vec![Call::Delete("g1".to_string())]);
        assert_eq!(board.notifier().shown.len(), 1);
        assert_eq!(board.notifier().shown[0].title, "Goal deleted.");
        assert_eq!(board.selection(), &Selection::Closed);
        assert!(board.goals().unwrap().is_empty());
    }

    #[test]
    fn delete_requires_existing_goal() {
        let mut board = board_with(vec![]);
        board.open_new();
        assert!(matches!(board.delete(), Err(GoalError::NoGoalSelected { .. })));
        assert!(board.notifier().shown.is_empty());
        assert!(board.is_open());
    }

    #[test]
    fn store_failure_still_closes_and_notifies() {
        // "g1" was never stored, so the store rejects the delete.
        let mut board = board_with(vec![]);
        board.open_goal(&g1());
        board.delete().unwrap();

        assert_eq!(board.selection(), &Selection::Closed);
        assert_eq!(board.notifier().shown.len(), 1);
    }

    #[test]
    fn update_after_delete_is_last_write_wins() {
        let mut board = board_with(vec![g1()]);
        board.open_goal(&g1());
        board.delete().unwrap();
        board.open_goal(&g1());
        board.submit(GoalForm::new("Ship v3", "", "")).unwrap();

        assert_eq!(
            board.store().count(|c| matches!(c, Call::Update { .. })),
            1
        );
        assert!(board.goals().unwrap().is_empty());
        assert_eq!(board.selection(), &Selection::Closed);
    }

    #[test]
    fn scope_change_rekeys_query() {
        let mut board = board_with(vec![]);
        board.set_scope(ViewScope::Team);
        board.set_scope(ViewScope::Team);
        assert_eq!(board.query().scope, ViewScope::Team);

        let next = week().shifted(1);
        board.set_week(next);
        assert_eq!(board.query().week, next);
        assert_eq!(board.query().scope, ViewScope::Team);
    }

    #[test]
    fn notifier_can_be_borrowed() {
        let mut notifier = FakeNotifier::default();
        {
            let mut board = GoalBoard::new(
                RecordingStore::seeded(vec![g1()]),
                &mut notifier,
                GoalQuery::new("alice", week()),
            );
            board.open_goal(&g1());
            board.delete().unwrap();
        }
        assert_eq!(notifier.shown.len(), 1);
    }
}
