// store.rs — GoalStore trait plus in-memory and JSON file implementations.
//
// The board talks to goals only through GoalStore. Goals are partitioned by
// (user, week); a Team query merges every user's partition for the week.
//
// Creation follows a two-step contract: the caller stages the goal's text
// with set_pending_text, then calls add with the remaining fields.
//
// JsonGoalStore layout: `<store_dir>/<user>/<week>.json`, one pretty-printed
// array per partition, kept in insertion order.

use std::fs;
use std::path::{Path, PathBuf};

use sg_week::{ViewScope, WeekKey};

use crate::error::GoalError;
use crate::goal::{Goal, Swatch};

/// The key the board hands to a store: who, which week, whose goals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalQuery {
    pub user: String,
    pub week: WeekKey,
    pub scope: ViewScope,
}

impl GoalQuery {
    /// A query for the user's own goals in `week`.
    pub fn new(user: impl Into<String>, week: WeekKey) -> Self {
        Self {
            user: user.into(),
            week,
            scope: ViewScope::Me,
        }
    }

    pub fn with_scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    /// Whether `goal` belongs in this query's result.
    pub fn matches(&self, goal: &Goal) -> bool {
        goal.week == self.week && (self.scope == ViewScope::Team || goal.owner == self.user)
    }
}

/// Source of goals for the board.
///
/// Mutations are fire-and-forget from the board's side: it logs failures
/// and moves on, and the next `list` is expected to reflect the change.
pub trait GoalStore {
    /// Goals matching `query`, in insertion order.
    fn list(&self, query: &GoalQuery) -> Result<Vec<Goal>, GoalError>;

    /// Text the next `add` will use.
    fn pending_text(&self) -> &str;

    /// Stage the text for the next `add`.
    fn set_pending_text(&mut self, text: &str);

    /// Create a goal from the pending text for the query's user and week.
    fn add(&mut self, query: &GoalQuery, description: &str, color: &Swatch) -> Result<Goal, GoalError>;

    fn update(&mut self, id: &str, text: &str, description: &str, color: &Swatch) -> Result<(), GoalError>;

    /// Flip a goal's completion flag. Returns the new value.
    fn toggle_complete(&mut self, id: &str) -> Result<bool, GoalError>;

    fn delete(&mut self, id: &str) -> Result<(), GoalError>;
}

/// In-process store. Useful for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryGoalStore {
    goals: Vec<Goal>,
    pending_text: String,
}

impl MemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing goals (kept in the given order).
    pub fn with_goals(goals: Vec<Goal>) -> Self {
        Self {
            goals,
            pending_text: String::new(),
        }
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Goal, GoalError> {
        self.goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| GoalError::NotFound(id.to_string()))
    }
}

impl GoalStore for MemoryGoalStore {
    fn list(&self, query: &GoalQuery) -> Result<Vec<Goal>, GoalError> {
        Ok(self.goals.iter().filter(|g| query.matches(g)).cloned().collect())
    }

    fn pending_text(&self) -> &str {
        &self.pending_text
    }

    fn set_pending_text(&mut self, text: &str) {
        self.pending_text = text.to_string();
    }

    fn add(&mut self, query: &GoalQuery, description: &str, color: &Swatch) -> Result<Goal, GoalError> {
        let text = std::mem::take(&mut self.pending_text);
        let goal = Goal::new(&query.user, query.week, text, description, color.clone());
        self.goals.push(goal.clone());
        Ok(goal)
    }

    fn update(&mut self, id: &str, text: &str, description: &str, color: &Swatch) -> Result<(), GoalError> {
        let goal = self.find_mut(id)?;
        goal.text = text.to_string();
        goal.description = description.to_string();
        goal.color = color.clone();
        Ok(())
    }

    fn toggle_complete(&mut self, id: &str) -> Result<bool, GoalError> {
        let goal = self.find_mut(id)?;
        goal.completed = !goal.completed;
        Ok(goal.completed)
    }

    fn delete(&mut self, id: &str) -> Result<(), GoalError> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() == before {
            return Err(GoalError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Persistent store: one JSON file per (user, week) partition.
pub struct JsonGoalStore {
    store_dir: PathBuf,
    pending_text: String,
}

impl JsonGoalStore {
    /// Create a new store backed by the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, GoalError> {
        let store_dir = store_dir.as_ref().to_path_buf();
        fs::create_dir_all(&store_dir).map_err(|source| GoalError::IoError {
            path: store_dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            store_dir,
            pending_text: String::new(),
        })
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Directory holding one user's partitions.
    fn user_dir(&self, user: &str) -> Result<PathBuf, GoalError> {
        let valid = !user.is_empty()
            && user != "."
            && user != ".."
            && !user.contains(['/', '\\']);
        if !valid {
            return Err(GoalError::InvalidUser(user.to_string()));
        }
        Ok(self.store_dir.join(user))
    }

    fn partition_file(&self, user: &str, week: WeekKey) -> Result<PathBuf, GoalError> {
        Ok(self.user_dir(user)?.join(format!("{}.json", week)))
    }

    fn read_partition(path: &Path) -> Result<Vec<Goal>, GoalError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write_partition(path: &Path, goals: &[Goal]) -> Result<(), GoalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(goals)?;
        fs::write(path, json).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Every partition file in the store, across users and weeks.
    fn partition_files(&self) -> Result<Vec<PathBuf>, GoalError> {
        let mut files = Vec::new();
        for user_dir in Self::read_dir(&self.store_dir)? {
            if !user_dir.is_dir() {
                continue;
            }
            for path in Self::read_dir(&user_dir)? {
                if path.extension().is_some_and(|ext| ext == "json") {
                    files.push(path);
                }
            }
        }
        Ok(files)
    }

    fn read_dir(dir: &Path) -> Result<Vec<PathBuf>, GoalError> {
        let entries = fs::read_dir(dir).map_err(|source| GoalError::IoError {
            path: dir.display().to_string(),
            source,
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| GoalError::IoError {
                path: dir.display().to_string(),
                source,
            })?;
            paths.push(entry.path());
        }
        paths.sort();
        Ok(paths)
    }

    /// Load, modify, and rewrite the partition holding goal `id`.
    ///
    /// Partitions that cannot be read are skipped: a damaged file belonging
    /// to another user or week must not block edits elsewhere.
    fn modify<T>(&self, id: &str, f: impl FnOnce(&mut Vec<Goal>, usize) -> T) -> Result<T, GoalError> {
        for path in self.partition_files()? {
            let mut goals = match Self::read_partition(&path) {
                Ok(goals) => goals,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "skipping unreadable goal partition: {}", e);
                    continue;
                }
            };
            if let Some(idx) = goals.iter().position(|g| g.id == id) {
                let out = f(&mut goals, idx);
                Self::write_partition(&path, &goals)?;
                return Ok(out);
            }
        }
        Err(GoalError::NotFound(id.to_string()))
    }
}

impl GoalStore for JsonGoalStore {
    fn list(&self, query: &GoalQuery) -> Result<Vec<Goal>, GoalError> {
        match query.scope {
            ViewScope::Me => Self::read_partition(&self.partition_file(&query.user, query.week)?),
            ViewScope::Team => {
                let file_name = format!("{}.json", query.week);
                let mut goals = Vec::new();
                for user_dir in Self::read_dir(&self.store_dir)? {
                    let path = user_dir.join(&file_name);
                    if user_dir.is_dir() && path.exists() {
                        goals.extend(Self::read_partition(&path)?);
                    }
                }
                // Stable sort: ties keep per-user insertion order.
                goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
                Ok(goals)
            }
        }
    }

    fn pending_text(&self) -> &str {
        &self.pending_text
    }

    fn set_pending_text(&mut self, text: &str) {
        self.pending_text = text.to_string();
    }

    fn add(&mut self, query: &GoalQuery, description: &str, color: &Swatch) -> Result<Goal, GoalError> {
        let path = self.partition_file(&query.user, query.week)?;
        let mut goals = Self::read_partition(&path)?;
        let goal = Goal::new(
            &query.user,
            query.week,
            self.pending_text.as_str(),
            description,
            color.clone(),
        );
        goals.push(goal.clone());
        Self::write_partition(&path, &goals)?;
        self.pending_text.clear();
        Ok(goal)
    }

    fn update(&mut self, id: &str, text: &str, description: &str, color: &Swatch) -> Result<(), GoalError> {
        self.modify(id, |goals, idx| {
            let goal = &mut goals[idx];
            goal.text = text.to_string();
            goal.description = description.to_string();
            goal.color = color.clone();
        })
    }

    fn toggle_complete(&mut self, id: &str) -> Result<bool, GoalError> {
        self.modify(id, |goals, idx| {
            let goal = &mut goals[idx];
            goal.completed = !goal.completed;
            goal.completed
        })
    }

    fn delete(&mut self, id: &str) -> Result<(), GoalError> {
        self.modify(id, |goals, idx| {
            goals.remove(idx);
        })
    }
}
