use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Task priority letter. `A` is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    A,
    B,
    C,
    D,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::A, Priority::B, Priority::C, Priority::D];

    /// The letter shown in group headers and badges
    pub fn letter(self) -> char {
        match self {
            Priority::A => 'A',
            Priority::B => 'B',
            Priority::C => 'C',
            Priority::D => 'D',
        }
    }

    /// Parse a priority letter (case-insensitive)
    pub fn from_letter(c: char) -> Option<Priority> {
        match c.to_ascii_uppercase() {
            'A' => Some(Priority::A),
            'B' => Some(Priority::B),
            'C' => Some(Priority::C),
            'D' => Some(Priority::D),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Sort rank of an optional priority: A=0 .. D=3, absent=4
pub fn priority_rank(priority: Option<Priority>) -> u8 {
    match priority {
        Some(Priority::A) => 0,
        Some(Priority::B) => 1,
        Some(Priority::C) => 2,
        Some(Priority::D) => 3,
        None => 4,
    }
}

/// Opaque task identifier, unique within a store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        TaskId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

/// One to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned at creation, never changes
    pub id: TaskId,
    /// Display text, never blank
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Project tags without the `+` marker
    #[serde(default)]
    pub projects: Vec<String>,
    /// Context tags without the `@` marker
    #[serde(default)]
    pub contexts: Vec<String>,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Free-form recurrence such as `1d` or `3m`; stored, never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    /// `YYYY-MM-DD`, set at creation
    pub creation_date: String,
}

/// Fields supplied when creating a task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub priority: Option<Priority>,
    pub projects: Vec<String>,
    pub due_date: Option<String>,
    pub recurrence: Option<String>,
}

impl TaskDraft {
    pub fn new(text: impl Into<String>) -> Self {
        TaskDraft {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.projects.push(project.into());
        self
    }
}

/// A partial update. `None` leaves a field untouched; for optional fields
/// `Some(None)` clears the value.
///
/// `id` and `creation_date` are not patchable; deserializing ignores those keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub priority: Option<Option<Priority>>,
    #[serde(default)]
    pub projects: Option<Vec<String>>,
    #[serde(default)]
    pub contexts: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub recurrence: Option<Option<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}

/// Distinguishes a missing key (outer `None`, via `default`) from an explicit `null`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_puts_absent_last() {
        let mut ranks: Vec<u8> = [None, Some(Priority::C), Some(Priority::A), Some(Priority::D)]
            .into_iter()
            .map(priority_rank)
            .collect();
        ranks.sort();
        assert_eq!(ranks, vec![0, 2, 3, 4]);
        assert!(priority_rank(Some(Priority::D)) < priority_rank(None));
    }

    #[test]
    fn priority_letters() {
        assert_eq!(Priority::from_letter('b'), Some(Priority::B));
        assert_eq!(Priority::from_letter('E'), None);
        assert_eq!(Priority::C.to_string(), "C");
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: TaskId::new("7"),
            text: "Water plants".into(),
            is_completed: false,
            priority: Some(Priority::B),
            projects: vec!["Home".into()],
            contexts: vec![],
            due_date: Some("2025-06-10".into()),
            recurrence: None,
            creation_date: "2025-06-01".into(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["priority"], "B");
        assert_eq!(json["dueDate"], "2025-06-10");
        assert_eq!(json["creationDate"], "2025-06-01");
        assert!(json.get("recurrence").is_none());
    }

    #[test]
    fn task_deserializes_with_defaults() {
        let task: Task = serde_json::from_str(
            r#"{"id":"x1","text":"Call mom","priority":null,"creationDate":"2025-01-02"}"#,
        )
        .unwrap();
        assert_eq!(task.id.as_str(), "x1");
        assert!(!task.is_completed);
        assert_eq!(task.priority, None);
        assert!(task.projects.is_empty());
        assert!(task.contexts.is_empty());
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn patch_distinguishes_missing_from_null() {
        let patch: TaskPatch = serde_json::from_str(r#"{"dueDate":null}"#).unwrap();
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.priority, None);

        let patch: TaskPatch = serde_json::from_str(r#"{"priority":"A"}"#).unwrap();
        assert_eq!(patch.priority, Some(Some(Priority::A)));
        assert_eq!(patch.due_date, None);
    }

    #[test]
    fn patch_ignores_id_and_creation_date() {
        let patch: TaskPatch =
            serde_json::from_str(r#"{"id":"99","creationDate":"1999-01-01"}"#).unwrap();
        assert!(patch.is_empty());
    }
}
