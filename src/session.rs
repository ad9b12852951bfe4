//! Process-lifetime application state shared by every front end.
//!
//! Front ends follow one sequence for every user action: mutate the session,
//! re-derive the groups with [`Session::groups`], render them.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::model::config::{AppSettings, Config};
use crate::model::task::{Task, TaskId, TaskPatch};
use crate::model::view::{Group, SortMode};
use crate::ops::form::{FormError, TaskForm};
use crate::ops::task_ops::TaskStore;
use crate::ops::view;

#[derive(Debug, Clone)]
pub struct Session {
    store: TaskStore,
    pub sort: SortMode,
    /// Raw search text, exactly as typed
    pub query: String,
    pub settings: AppSettings,
    /// Fixed "today" for reproducible output; `None` means the local date
    pub today_override: Option<NaiveDate>,
}

impl Session {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        Session {
            store,
            sort: config.view.sort,
            query: String::new(),
            settings: config.ui,
            today_override: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Derive the displayed groups from the current state.
    pub fn groups(&self) -> Vec<Group<'_>> {
        view::project(self.store.tasks(), self.sort, &self.query, self.today())
    }

    /// Create a task from form input. `Ok(None)` means the form was blank and
    /// was discarded.
    pub fn submit_new(&mut self, form: TaskForm) -> Result<Option<TaskId>, FormError> {
        match form.into_draft()? {
            Some(draft) => Ok(self.store.create(draft)),
            None => {
                debug!("new-task form discarded: blank text");
                Ok(None)
            }
        }
    }

    /// Apply an edit form to an existing task. Returns whether a task changed.
    pub fn submit_edit(&mut self, id: &TaskId, form: TaskForm) -> Result<bool, FormError> {
        match form.into_patch()? {
            Some(patch) => Ok(self.store.update(id, patch)),
            None => {
                debug!(%id, "edit form discarded: blank text");
                Ok(false)
            }
        }
    }

    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) -> bool {
        self.store.update(id, patch)
    }

    pub fn toggle_complete(&mut self, id: &TaskId) -> Option<bool> {
        self.store.toggle_complete(id)
    }

    pub fn delete(&mut self, id: &TaskId) -> bool {
        self.store.delete(id)
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }
}
