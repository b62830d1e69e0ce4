//! Task types for the kanban board.
//!
//! A [`Task`] lives inside exactly one project and sits in the column named
//! by its `status`. Serialized field names follow the export document
//! (camelCase, `due` as an ISO date omitted when absent).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::project::ColumnId;

/// Unique identifier for a task, unique across every project on the board.
///
/// Ids are opaque strings: seeded tasks carry short numeric ids while tasks
/// created at runtime get whatever the id generator hands out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Category chip shown on a task card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
    /// New functionality.
    Feature,
    /// Defect.
    Bug,
    /// No label; the card shows no chip.
    #[default]
    None,
}

impl Label {
    /// Every label, in the order the creation form lists them.
    pub const ALL: [Self; 6] = [
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Feature,
        Self::Bug,
        Self::None,
    ];

    /// Returns the lowercase name used in the export document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`Label`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct ParseLabelError(String);

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == wanted)
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}

/// A comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment body.
    pub text: String,
    /// When the comment was written.
    pub time: DateTime<Utc>,
}

/// A task card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, immutable task identifier.
    pub id: TaskId,
    /// Non-empty title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Display name of the person the task is assigned to.
    pub assignee: String,
    /// Optional due date (calendar day, no time component).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    /// Column the task currently sits in.
    pub status: ColumnId,
    /// Category chip.
    pub label: Label,
    /// Ordered subtask names.
    pub subtasks: Vec<String>,
    /// How many subtasks are done. Never exceeds `subtasks.len()`.
    #[serde(default)]
    pub subtasks_completed: u32,
    /// Ordered comments, oldest first.
    pub comments: Vec<Comment>,
}

impl Task {
    /// Returns subtask progress as a whole percentage in `0..=100`.
    ///
    /// A task without subtasks reports 0.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        let total = u32::try_from(self.subtasks.len()).unwrap_or(u32::MAX);
        if total == 0 {
            return 0;
        }
        self.subtasks_completed.min(total) * 100 / total
    }

    /// Returns `true` when every subtask is marked complete.
    #[must_use]
    pub fn subtasks_done(&self) -> bool {
        u32::try_from(self.subtasks.len()).is_ok_and(|total| self.subtasks_completed >= total)
    }
}
