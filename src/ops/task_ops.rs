use std::collections::HashSet;

use chrono::Local;
use tracing::debug;

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};

/// Error type for seeding a store from existing records
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate task id: {0}")]
    DuplicateId(TaskId),
    #[error("task {0} has blank text")]
    BlankText(TaskId),
}

/// The authoritative, insertion-ordered task collection.
///
/// Mutations never fail: requests against unknown ids or with blank text are
/// silent no-ops, reported only through the return value.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a store from existing records, checking the id and text invariants.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for task in &tasks {
            if task.text.trim().is_empty() {
                return Err(StoreError::BlankText(task.id.clone()));
            }
            if !seen.insert(task.id.clone()) {
                return Err(StoreError::DuplicateId(task.id.clone()));
            }
        }
        Ok(TaskStore { tasks, next_id: 1 })
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    /// Create a task from a draft, stamped with today's date.
    /// Returns `None` (and changes nothing) when the text is blank.
    pub fn create(&mut self, draft: TaskDraft) -> Option<TaskId> {
        self.create_on(draft, &today_str())
    }

    /// Create with an explicit creation date
    pub fn create_on(&mut self, draft: TaskDraft, creation_date: &str) -> Option<TaskId> {
        if draft.text.trim().is_empty() {
            debug!("create ignored: blank text");
            return None;
        }
        let id = self.allocate_id();
        self.tasks.push(Task {
            id: id.clone(),
            text: draft.text,
            is_completed: false,
            priority: draft.priority,
            projects: draft.projects,
            contexts: Vec::new(),
            due_date: draft.due_date,
            recurrence: draft.recurrence,
            creation_date: creation_date.to_string(),
        });
        debug!(%id, "task created");
        Some(id)
    }

    /// Merge `patch` over the task with `id`. Returns whether a task was found.
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) -> bool {
        let Some(task) = self.get_mut(id) else {
            debug!(%id, "update ignored: unknown id");
            return false;
        };

        if let Some(text) = patch.text {
            if text.trim().is_empty() {
                debug!(%id, "update kept old text: new text is blank");
            } else {
                task.text = text;
            }
        }
        if let Some(done) = patch.is_completed {
            task.is_completed = done;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(projects) = patch.projects {
            task.projects = projects;
        }
        if let Some(contexts) = patch.contexts {
            task.contexts = contexts;
        }
        if let Some(due) = patch.due_date {
            task.due_date = due;
        }
        if let Some(recurrence) = patch.recurrence {
            task.recurrence = recurrence;
        }
        debug!(%id, "task updated");
        true
    }

    /// Flip completion. Returns the new state, or `None` for an unknown id.
    pub fn toggle_complete(&mut self, id: &TaskId) -> Option<bool> {
        let Some(task) = self.get_mut(id) else {
            debug!(%id, "toggle ignored: unknown id");
            return None;
        };
        task.is_completed = !task.is_completed;
        Some(task.is_completed)
    }

    /// Remove the task with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!(%id, "task deleted");
        } else {
            debug!(%id, "delete ignored: unknown id");
        }
        removed
    }

    /// Next free decimal id. Seeded tasks may already use some numbers.
    fn allocate_id(&mut self) -> TaskId {
        loop {
            let candidate = TaskId::new(self.next_id.max(1).to_string());
            self.next_id = self.next_id.max(1) + 1;
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

pub(crate) fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
