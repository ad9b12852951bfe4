use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::task::{Priority, Task};

/// Active grouping strategy for the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Priority,
    Due,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Priority => "priority",
            SortMode::Due => "due",
        }
    }

    pub fn toggled(self) -> SortMode {
        match self {
            SortMode::Priority => SortMode::Due,
            SortMode::Due => SortMode::Priority,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "priority" | "pri" | "p" => Ok(SortMode::Priority),
            "due" | "date" | "d" => Ok(SortMode::Due),
            _ => Err(format!("unknown sort mode '{}' (expected: priority, due)", s)),
        }
    }
}

/// Due-date bucket, declared in display precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    Later,
    NoDate,
}

impl DueBucket {
    pub const ORDER: [DueBucket; 5] = [
        DueBucket::Overdue,
        DueBucket::Today,
        DueBucket::Tomorrow,
        DueBucket::Later,
        DueBucket::NoDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DueBucket::Overdue => "Overdue",
            DueBucket::Today => "Today",
            DueBucket::Tomorrow => "Tomorrow",
            DueBucket::Later => "Later",
            DueBucket::NoDate => "No Date",
        }
    }
}

/// Identity of a displayed group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Priority mode; `None` is the "No Priority" group
    Priority(Option<Priority>),
    Due(DueBucket),
}

impl GroupKey {
    pub fn label(&self) -> String {
        match self {
            GroupKey::Priority(Some(p)) => p.to_string(),
            GroupKey::Priority(None) => "No Priority".to_string(),
            GroupKey::Due(bucket) => bucket.label().to_string(),
        }
    }
}

/// A named bucket of tasks produced by the view projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub key: GroupKey,
    pub tasks: Vec<&'a Task>,
}

impl Group<'_> {
    pub fn label(&self) -> String {
        self.key.label()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
