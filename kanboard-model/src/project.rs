//! Projects and board columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// Stable identifier of a board column; the domain of [`Task::status`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a column id from any string-like value.
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

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A fixed status column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Identifier matched against task statuses.
    pub id: ColumnId,
    /// Display label.
    pub title: String,
}

impl Column {
    /// Creates a column.
    #[must_use]
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: ColumnId::new(id),
            title: title.to_string(),
        }
    }
}

/// The standard four-column workflow: To Do, In Progress, Review, Done.
#[must_use]
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("todo", "To Do"),
        Column::new("inprogress", "In Progress"),
        Column::new("review", "Review"),
        Column::new("done", "Done"),
    ]
}

/// Unique, immutable project identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a project id from any string-like value.
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

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A project and the tasks it exclusively owns, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Display name; also used as the export file stem.
    pub name: String,
    /// Tasks in insertion order.
    pub tasks: Vec<Task>,
}

impl Project {
    /// Creates an empty project.
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: ProjectId::new(id),
            name: name.to_string(),
            tasks: Vec::new(),
        }
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Returns `true` if the project owns a task with this id.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.iter().any(|t| &t.id == id)
    }
}
