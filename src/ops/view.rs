//! Projection of the task collection into displayed groups.
//!
//! `project` is a pure function of (tasks, sort mode, search query, today).
//! Callers recompute it after every mutation or input change.

use std::cmp::Ordering;

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;

use crate::model::task::{Task, priority_rank};
use crate::model::view::{DueBucket, Group, GroupKey, SortMode};

/// Project `tasks` into ordered groups using the local calendar date as today.
pub fn project_now<'a>(tasks: &'a [Task], mode: SortMode, query: &str) -> Vec<Group<'a>> {
    project(tasks, mode, query, Local::now().date_naive())
}

/// Filter, sort, and group `tasks`.
pub fn project<'a>(
    tasks: &'a [Task],
    mode: SortMode,
    query: &str,
    today: NaiveDate,
) -> Vec<Group<'a>> {
    let filtered = filter_tasks(tasks, query);
    match mode {
        SortMode::Priority => group_by_priority(filtered),
        SortMode::Due => group_by_due(filtered, today),
    }
}

/// Keep tasks whose text or any project contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    if query.trim().is_empty() {
        return tasks.iter().collect();
    }
    // Only the emptiness check trims; the match itself uses the raw query.
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|t| matches_query(t, &needle))
        .collect()
}

fn matches_query(task: &Task, needle: &str) -> bool {
    task.text.to_lowercase().contains(needle)
        || task
            .projects
            .iter()
            .any(|p| p.to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Priority mode
// ---------------------------------------------------------------------------

/// Priority order, with equal priorities tie-broken by due date.
///
/// An absent due date compares as the empty string, so undated tasks sort
/// ahead of dated ones within the same priority.
pub fn compare_priority_then_due(a: &Task, b: &Task) -> Ordering {
    match (a.priority, b.priority) {
        (Some(pa), Some(pb)) if pa != pb => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => {
            let da = a.due_date.as_deref().unwrap_or("");
            let db = b.due_date.as_deref().unwrap_or("");
            da.cmp(db)
        }
    }
}

fn group_by_priority(mut tasks: Vec<&Task>) -> Vec<Group<'_>> {
    tasks.sort_by(|a, b| compare_priority_then_due(a, b));

    // Groups appear in the order their key is first seen in the sorted list.
    let mut groups: IndexMap<GroupKey, Vec<&Task>> = IndexMap::new();
    for task in tasks {
        groups
            .entry(GroupKey::Priority(task.priority))
            .or_default()
            .push(task);
    }
    groups
        .into_iter()
        .map(|(key, tasks)| Group { key, tasks })
        .collect()
}

// ---------------------------------------------------------------------------
// Due mode
// ---------------------------------------------------------------------------

/// Bucket a due date relative to `today` by comparing `YYYY-MM-DD` strings.
pub fn due_bucket(due_date: Option<&str>, today: NaiveDate) -> DueBucket {
    let Some(date) = due_date else {
        return DueBucket::NoDate;
    };
    let today_s = today.format("%Y-%m-%d").to_string();
    if date < today_s.as_str() {
        return DueBucket::Overdue;
    }
    if date == today_s {
        return DueBucket::Today;
    }
    let tomorrow = today
        .succ_opt()
        .map(|d| d.format("%Y-%m-%d").to_string());
    if tomorrow.as_deref() == Some(date) {
        return DueBucket::Tomorrow;
    }
    DueBucket::Later
}

fn group_by_due(tasks: Vec<&Task>, today: NaiveDate) -> Vec<Group<'_>> {
    let mut buckets: IndexMap<DueBucket, Vec<&Task>> = IndexMap::new();
    for task in tasks {
        buckets
            .entry(due_bucket(task.due_date.as_deref(), today))
            .or_default()
            .push(task);
    }
    buckets.sort_keys();

    buckets
        .into_iter()
        .map(|(bucket, mut tasks)| {
            // Stable: equal priorities keep their collection order.
            tasks.sort_by_key(|t| priority_rank(t.priority));
            Group {
                key: GroupKey::Due(bucket),
                tasks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, TaskId};
    use pretty_assertions::assert_eq;

    fn task(id: &str, text: &str, priority: Option<Priority>, due: Option<&str>) -> Task {
        Task {
            id: TaskId::new(id),
            text: text.to_string(),
            is_completed: false,
            priority,
            projects: Vec::new(),
            contexts: Vec::new(),
            due_date: due.map(str::to_string),
            recurrence: None,
            creation_date: "2025-06-01".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn labels(groups: &[Group]) -> Vec<String> {
        groups.iter().map(|g| g.label()).collect()
    }

    fn ids(group: &Group) -> Vec<String> {
        group.tasks.iter().map(|t| t.id.to_string()).collect()
    }

    // --- filter ---

    #[test]
    fn blank_query_keeps_everything() {
        let tasks = vec![task("0", "a", None, None), task("1", "b", None, None)];
        assert_eq!(filter_tasks(&tasks, "").len(), 2);
        assert_eq!(filter_tasks(&tasks, "   ").len(), 2);
    }

    #[test]
    fn query_matches_text_case_insensitively() {
        let tasks = vec![
            task("0", "Buy MILK", None, None),
            task("1", "Walk dog", None, None),
        ];
        let hits = filter_tasks(&tasks, "milk");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "0");
    }

    #[test]
    fn query_matches_projects() {
        let mut t = task("0", "Email", None, None);
        t.projects = vec!["WorkStuff".into()];
        let tasks = vec![t, task("1", "Other", None, None)];
        let hits = filter_tasks(&tasks, "work");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "0");
    }

    #[test]
    fn query_does_not_match_contexts() {
        let mut t = task("0", "Email", None, None);
        t.contexts = vec!["office".into()];
        let tasks = vec![t];
        assert!(filter_tasks(&tasks, "office").is_empty());
    }

    #[test]
    fn query_is_matched_untrimmed() {
        let tasks = vec![task("0", "buy milk", None, None)];
        assert_eq!(filter_tasks(&tasks, " milk").len(), 1);
        assert!(filter_tasks(&tasks, "milk ").is_empty());
    }

    #[test]
    fn filtered_set_is_subset_and_every_hit_matches() {
        let mut tasks = vec![
            task("0", "Plan trip", Some(Priority::A), None),
            task("1", "Pack bags", None, Some("2025-06-11")),
            task("2", "Pay rent", Some(Priority::C), None),
            task("3", "Call Pat", None, None),
        ];
        tasks[3].projects = vec!["Trip".into()];
        for query in ["p", "trip", "PA", "zzz", "a"] {
            let hits = filter_tasks(&tasks, query);
            assert!(hits.len() <= tasks.len());
            let q = query.to_lowercase();
            for hit in hits {
                assert!(tasks.iter().any(|t| t.id == hit.id));
                assert!(
                    hit.text.to_lowercase().contains(&q)
                        || hit.projects.iter().any(|p| p.to_lowercase().contains(&q))
                );
            }
        }
    }

    // --- priority mode ---

    #[test]
    fn priority_groups_in_first_seen_order() {
        let tasks = vec![
            task("0", "t0", Some(Priority::A), None),
            task("1", "t1", None, None),
            task("2", "t2", Some(Priority::A), None),
            task("3", "t3", Some(Priority::B), None),
        ];
        let groups = project(&tasks, SortMode::Priority, "", today());
        assert_eq!(labels(&groups), vec!["A", "B", "No Priority"]);
        assert_eq!(ids(&groups[0]), vec!["0", "2"]);
        assert_eq!(ids(&groups[1]), vec!["3"]);
        assert_eq!(ids(&groups[2]), vec!["1"]);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn priority_groups_skip_missing_levels() {
        let tasks = vec![
            task("0", "t0", Some(Priority::D), None),
            task("1", "t1", Some(Priority::B), None),
        ];
        let groups = project(&tasks, SortMode::Priority, "", today());
        assert_eq!(labels(&groups), vec!["B", "D"]);
    }

    #[test]
    fn priority_ties_break_by_due_date() {
        let tasks = vec![
            task("0", "late", Some(Priority::A), Some("2025-07-01")),
            task("1", "early", Some(Priority::A), Some("2025-06-01")),
        ];
        let groups = project(&tasks, SortMode::Priority, "", today());
        assert_eq!(ids(&groups[0]), vec!["1", "0"]);
    }

    // Undated tasks jump ahead of dated ones inside a priority group.
    // Kept for compatibility; flagged here so a change is deliberate.
    #[test]
    fn priority_tie_break_puts_undated_first() {
        let tasks = vec![
            task("0", "dated", Some(Priority::B), Some("2025-06-11")),
            task("1", "undated", Some(Priority::B), None),
            task("2", "np dated", None, Some("2025-06-09")),
            task("3", "np undated", None, None),
        ];
        let groups = project(&tasks, SortMode::Priority, "", today());
        assert_eq!(ids(&groups[0]), vec!["1", "0"]);
        assert_eq!(ids(&groups[1]), vec!["3", "2"]);
    }

    #[test]
    fn priority_mode_keeps_completed_tasks() {
        let mut done = task("0", "done", Some(Priority::A), None);
        done.is_completed = true;
        let tasks = vec![done];
        let groups = project(&tasks, SortMode::Priority, "", today());
        assert_eq!(groups.len(), 1);
        assert!(groups[0].tasks[0].is_completed);
    }

    // --- due mode ---

    #[test]
    fn due_buckets_relative_to_today() {
        let t = today();
        assert_eq!(due_bucket(Some("2025-06-09"), t), DueBucket::Overdue);
        assert_eq!(due_bucket(Some("2025-06-10"), t), DueBucket::Today);
        assert_eq!(due_bucket(Some("2025-06-11"), t), DueBucket::Tomorrow);
        assert_eq!(due_bucket(Some("2025-06-15"), t), DueBucket::Later);
        assert_eq!(due_bucket(None, t), DueBucket::NoDate);
    }

    #[test]
    fn tomorrow_crosses_month_and_year() {
        let eom = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(due_bucket(Some("2025-07-01"), eom), DueBucket::Tomorrow);
        let eoy = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(due_bucket(Some("2026-01-01"), eoy), DueBucket::Tomorrow);
    }

    #[test]
    fn malformed_dates_compare_lexicographically() {
        let t = today();
        assert_eq!(due_bucket(Some("1st of June"), t), DueBucket::Overdue);
        assert_eq!(due_bucket(Some("soon"), t), DueBucket::Later);
    }

    #[test]
    fn due_groups_follow_fixed_precedence() {
        let tasks = vec![
            task("0", "later", None, Some("2025-06-15")),
            task("1", "none", None, None),
            task("2", "tomorrow", None, Some("2025-06-11")),
            task("3", "today", None, Some("2025-06-10")),
            task("4", "overdue", None, Some("2025-06-09")),
        ];
        let groups = project(&tasks, SortMode::Due, "", today());
        assert_eq!(
            labels(&groups),
            vec!["Overdue", "Today", "Tomorrow", "Later", "No Date"]
        );
    }

    #[test]
    fn due_groups_skip_empty_buckets() {
        let tasks = vec![
            task("0", "none", None, None),
            task("1", "overdue", None, Some("2024-01-01")),
        ];
        let groups = project(&tasks, SortMode::Due, "", today());
        assert_eq!(labels(&groups), vec!["Overdue", "No Date"]);
    }

    #[test]
    fn due_group_members_sorted_by_priority_stably() {
        let tasks = vec![
            task("0", "none1", None, Some("2025-06-20")),
            task("1", "c", Some(Priority::C), Some("2025-06-30")),
            task("2", "a", Some(Priority::A), Some("2025-07-01")),
            task("3", "none2", None, Some("2025-06-16")),
            task("4", "c2", Some(Priority::C), Some("2025-06-20")),
        ];
        let groups = project(&tasks, SortMode::Due, "", today());
        assert_eq!(groups.len(), 1);
        // No due-date tie-break here: equal priorities keep collection order.
        assert_eq!(ids(&groups[0]), vec!["2", "1", "4", "0", "3"]);
    }

    #[test]
    fn search_applies_before_grouping() {
        let tasks = vec![
            task("0", "Buy milk", Some(Priority::A), None),
            task("1", "Buy bread", Some(Priority::B), None),
            task("2", "Walk", Some(Priority::A), None),
        ];
        let groups = project(&tasks, SortMode::Priority, "buy", today());
        assert_eq!(labels(&groups), vec!["A", "B"]);
        assert_eq!(ids(&groups[0]), vec!["0"]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let tasks: Vec<Task> = Vec::new();
        assert!(project(&tasks, SortMode::Priority, "", today()).is_empty());
        assert!(project(&tasks, SortMode::Due, "x", today()).is_empty());
    }

    #[test]
    fn no_matches_yields_no_groups() {
        let tasks = vec![task("0", "Buy milk", None, None)];
        assert!(project(&tasks, SortMode::Due, "zebra", today()).is_empty());
    }

    #[test]
    fn projection_does_not_reorder_source() {
        let tasks = vec![
            task("0", "b", Some(Priority::B), None),
            task("1", "a", Some(Priority::A), None),
        ];
        let _ = project(&tasks, SortMode::Priority, "", today());
        assert_eq!(tasks[0].id.as_str(), "0");
    }

    #[test]
    fn project_now_uses_local_date() {
        let today_s = Local::now().format("%Y-%m-%d").to_string();
        let tasks = vec![task("0", "now", None, Some(today_s.as_str()))];
        let groups = project_now(&tasks, SortMode::Due, "");
        assert_eq!(labels(&groups), vec!["Today"]);
    }
}
