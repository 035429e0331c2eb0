use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub priority: Priority,
    // Assigned once at creation; also the tie-break ordering key.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Display order: open items before done ones, High priority ahead of the
/// rest, then newest first.
pub fn sort_for_display(todos: &mut [TodoItem]) {
    todos.sort_by(|a, b| {
        if a.completed != b.completed {
            return a.completed.cmp(&b.completed);
        }
        let a_high = a.priority == Priority::High;
        let b_high = b.priority == Priority::High;
        if a_high != b_high {
            return b_high.cmp(&a_high);
        }
        b.created_at.cmp(&a.created_at)
    });
}
