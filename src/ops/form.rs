use std::sync::OnceLock;

use regex::Regex;

use crate::model::task::{Priority, Task, TaskDraft, TaskPatch};

/// Error type for form input that cannot become a task field
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid priority '{0}' (expected: A, B, C, D, or - for none)")]
    InvalidPriority(String),
    #[error("invalid due date '{0}' (expected: YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Raw input from a create/edit surface, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub text: String,
    pub priority: String,
    pub due_date: String,
    /// Whitespace-separated project tokens, each optionally prefixed with `+`
    pub projects: String,
    /// Stored as typed; blank means none
    pub recurrence: String,
}

impl TaskForm {
    /// Pre-fill a form from an existing task (for editing)
    pub fn from_task(task: &Task) -> Self {
        TaskForm {
            text: task.text.clone(),
            priority: task.priority.map(|p| p.to_string()).unwrap_or_default(),
            due_date: task.due_date.clone().unwrap_or_default(),
            projects: task.projects.join(" "),
            recurrence: task.recurrence.clone().unwrap_or_default(),
        }
    }

    /// Validate into a creation draft. `Ok(None)` means the text is blank and
    /// the form should be discarded.
    pub fn into_draft(self) -> Result<Option<TaskDraft>, FormError> {
        if self.text.trim().is_empty() {
            return Ok(None);
        }
        let recurrence = Some(self.recurrence.trim().to_string()).filter(|r| !r.is_empty());
        Ok(Some(TaskDraft {
            priority: parse_priority(&self.priority)?,
            due_date: parse_due_date(&self.due_date)?,
            projects: parse_projects(&self.projects),
            text: self.text,
            recurrence,
        }))
    }

    /// Validate into an edit patch replacing text, priority, due date, and
    /// projects. Empty priority or date fields clear the stored value.
    /// Recurrence is left untouched.
    pub fn into_patch(self) -> Result<Option<TaskPatch>, FormError> {
        if self.text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(TaskPatch {
            priority: Some(parse_priority(&self.priority)?),
            due_date: Some(parse_due_date(&self.due_date)?),
            projects: Some(parse_projects(&self.projects)),
            text: Some(self.text),
            ..Default::default()
        }))
    }
}

/// Parse a priority field: `A`..`D` in either case, or empty / `-` / `none`.
pub fn parse_priority(s: &str) -> Result<Option<Priority>, FormError> {
    let s = s.trim();
    if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Priority::from_letter(c)
            .map(Some)
            .ok_or_else(|| FormError::InvalidPriority(s.to_string())),
        _ => Err(FormError::InvalidPriority(s.to_string())),
    }
}

fn date_re() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"))
}

/// Parse a due date field. Empty means no date; anything else must look like
/// `YYYY-MM-DD` (calendar validity is not checked).
pub fn parse_due_date(s: &str) -> Result<Option<String>, FormError> {
    let s = s.trim();
    if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    if date_re().is_match(s) {
        Ok(Some(s.to_string()))
    } else {
        Err(FormError::InvalidDate(s.to_string()))
    }
}

/// Split project input on whitespace and strip one leading `+` from each token.
/// Tokens that are empty after stripping are dropped; duplicates are kept.
pub fn parse_projects(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(|tok| tok.strip_prefix('+').unwrap_or(tok))
        .filter(|tok| !tok.is_empty())
        .map(str::to_string)
        .collect()
}
