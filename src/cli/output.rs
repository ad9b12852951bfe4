use serde::Serialize;

use crate::model::config::AppSettings;
use crate::model::task::Task;
use crate::model::view::{Group, SortMode};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ViewJson<'a> {
    pub sort: SortMode,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub search: &'a str,
    pub groups: Vec<GroupJson<'a>>,
}

#[derive(Serialize)]
pub struct GroupJson<'a> {
    pub label: String,
    pub count: usize,
    pub tasks: Vec<&'a Task>,
}

pub fn view_to_json<'a>(groups: &[Group<'a>], sort: SortMode, search: &'a str) -> ViewJson<'a> {
    ViewJson {
        sort,
        search,
        groups: groups
            .iter()
            .map(|g| GroupJson {
                label: g.label(),
                count: g.len(),
                tasks: g.tasks.clone(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn checkbox(task: &Task) -> &'static str {
    if task.is_completed { "[x]" } else { "[ ]" }
}

/// Format a single task as a one-line summary.
///
/// Compact mode drops tags and shows the bare due date, like the dense list.
pub fn format_task_line(task: &Task, settings: &AppSettings) -> String {
    let mut line = format!("{} {:>3}  {}", checkbox(task), task.id, task.text);
    if settings.compact {
        if let Some(due) = &task.due_date {
            line.push_str(&format!("  {}", due));
        }
        return line;
    }
    for p in &task.projects {
        line.push_str(&format!(" +{}", p));
    }
    for c in &task.contexts {
        line.push_str(&format!(" @{}", c));
    }
    if let Some(due) = &task.due_date {
        line.push_str(&format!(" due:{}", due));
    }
    line
}

/// Format a group header. Priority groups carry a count badge; due groups
/// show their bucket name in capitals.
pub fn format_group_header(group: &Group, sort: SortMode) -> String {
    match sort {
        SortMode::Priority => format!("== {} ({}) ==", group.label(), group.len()),
        SortMode::Due => format!("== {} ==", group.label().to_uppercase()),
    }
}

/// Format the whole projected view.
pub fn format_view(
    groups: &[Group],
    sort: SortMode,
    settings: &AppSettings,
    total_tasks: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    if total_tasks == 0 {
        lines.push("No tasks found. Add one!".to_string());
        return lines;
    }
    if groups.is_empty() {
        lines.push("No matching tasks".to_string());
        return lines;
    }
    let spacing = settings.font_size.group_spacing();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            lines.extend(std::iter::repeat_n(String::new(), spacing));
        }
        lines.push(format_group_header(group, sort));
        for task in &group.tasks {
            lines.push(format_task_line(task, settings));
        }
    }
    lines
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = vec![format!("{} {}  {}", checkbox(task), task.id, task.text)];
    lines.push(format!(
        "priority: {}",
        task.priority.map_or("-".to_string(), |p| p.to_string())
    ));
    if !task.projects.is_empty() {
        lines.push(format!(
            "projects: {}",
            task.projects
                .iter()
                .map(|p| format!("+{}", p))
                .collect::<Vec<_>>()
                .join(" ")
        ));
    }
    if !task.contexts.is_empty() {
        lines.push(format!(
            "contexts: {}",
            task.contexts
                .iter()
                .map(|c| format!("@{}", c))
                .collect::<Vec<_>>()
                .join(" ")
        ));
    }
    if let Some(due) = &task.due_date {
        lines.push(format!("due: {}", due));
    }
    if let Some(rec) = &task.recurrence {
        lines.push(format!("recurrence: {}", rec));
    }
    lines.push(format!("created: {}", task.creation_date));
    lines
}

/// Format settings for display
pub fn format_settings(settings: &AppSettings) -> Vec<String> {
    vec![
        format!("font-size: {}", settings.font_size),
        format!("compact: {}", settings.compact),
    ]
}
