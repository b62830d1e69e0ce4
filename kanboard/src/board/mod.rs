//! Kanban board state for `Kanboard`.
//!
//! The board is split into a pure query layer (filters, metrics, due-date
//! checks) and a [`BoardStore`] that owns every project and performs all
//! task mutations. Each successful mutation yields exactly one
//! [`Activity`] describing what changed.

pub mod activity;
pub mod clock;
pub mod ids;
pub mod query;
pub mod seed;
pub mod store;

pub use activity::{Activity, ActivityLog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, SequentialIds, UuidV7Ids};
pub use query::{
    BoardMetrics, DueState, Filter, compute_board_metrics, due_state, is_due_today, is_overdue,
    list_visible_tasks, matches_search,
};
pub use store::{BoardStore, NewTask, ProjectSummary, split_subtasks};

use kanboard_model::export::ExportError;
use thiserror::Error;

/// Errors that can occur during board operations.
///
/// Every operation that returns one of these leaves the board unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Task title is empty or whitespace-only.
    #[error("task must have a title")]
    TitleEmpty,
    /// No task with the given ID exists in the current project.
    #[error("task not found: {0}")]
    TaskNotFound(String),
    /// No project with the given ID exists.
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    /// The status names no configured column.
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    /// A task's status names no configured column.
    #[error("task {task_id} has status {status}, which is not a configured column")]
    UnmappedStatus {
        /// The offending task.
        task_id: String,
        /// Its status.
        status: String,
    },
    /// Every project has been removed.
    #[error("no project selected")]
    NoProjectSelected,
    /// All subtasks of the task are already complete.
    #[error("all subtasks already complete: {0}")]
    SubtasksComplete(String),
    /// The current project could not be exported.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl BoardError {
    /// Returns `true` for lookups that missed (unknown task or project).
    ///
    /// Callers driving the board from user input treat these as non-fatal.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_) | Self::ProjectNotFound(_))
    }
}
