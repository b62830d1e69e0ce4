//! Application state and command dispatch.
//!
//! [`App`] is the one object the interaction layer talks to. It owns the
//! [`BoardStore`], the active [`Filter`], and the [`ActivityLog`]; user
//! intent arrives as a [`Command`] and derived views come back as a
//! [`BoardView`] snapshot.

use chrono::NaiveDate;
use kanboard_model::{Column, ColumnId, Project, ProjectId, Task, TaskId, export};

use crate::board::{
    ActivityLog, BoardError, BoardMetrics, BoardStore, Filter, NewTask, compute_board_metrics,
    list_visible_tasks,
};

/// A user action against the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a task from form values.
    CreateTask(NewTask),
    /// Move a task to another column (the drag-and-drop payload).
    MoveTask {
        /// Task being dragged.
        task_id: TaskId,
        /// Column it was dropped on.
        status: ColumnId,
    },
    /// Remove a task for good.
    ArchiveTask(TaskId),
    /// Tick off the next subtask of a task.
    CompleteSubtask(TaskId),
    /// Switch the current project.
    SelectProject(ProjectId),
    /// Discard a project and its tasks.
    RemoveProject(ProjectId),
    /// Replace the search text; empty clears it.
    Search(String),
    /// Flip the due-today filter.
    ToggleDueToday,
    /// Empty the activity feed.
    ClearActivity,
}

/// What a successfully dispatched [`Command`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A task was created.
    TaskCreated(Task),
    /// A task changed column.
    TaskMoved(TaskId),
    /// A task was removed.
    TaskArchived(TaskId),
    /// A subtask was ticked off.
    SubtaskCompleted(TaskId),
    /// The current project changed.
    ProjectSelected(ProjectId),
    /// A project was removed; holds the new current project, if any.
    ProjectRemoved(Option<ProjectId>),
    /// Search or due-today filter changed.
    FilterChanged,
    /// The activity feed was emptied.
    ActivityCleared,
}

impl Outcome {
    /// Returns `true` if the board contents may have changed and should be
    /// redrawn.
    #[must_use]
    pub const fn changes_board(&self) -> bool {
        !matches!(self, Self::ActivityCleared)
    }
}

/// One column of a [`BoardView`].
#[derive(Debug, Clone)]
pub struct ColumnView<'a> {
    /// The column.
    pub column: &'a Column,
    /// Visible tasks in insertion order.
    pub tasks: Vec<&'a Task>,
}

/// Snapshot of everything needed to draw the current board.
#[derive(Debug, Clone)]
pub struct BoardView<'a> {
    /// The current project.
    pub project: &'a Project,
    /// Columns with their visible tasks.
    pub columns: Vec<ColumnView<'a>>,
    /// Counts over the visible tasks.
    pub metrics: BoardMetrics,
    /// Filter that produced this view.
    pub filter: &'a Filter,
    /// The terminal column.
    pub done_column: &'a ColumnId,
    /// Date used for due-date checks.
    pub today: NaiveDate,
}

/// A serialized project ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedProject {
    /// Suggested file name, `<project name>.json`.
    pub file_name: String,
    /// The JSON document.
    pub document: String,
}

/// Main application state.
pub struct App {
    store: BoardStore,
    filter: Filter,
    activity: ActivityLog,
}

impl App {
    /// Wraps a store with an empty filter and a default-sized activity log.
    #[must_use]
    pub fn new(store: BoardStore) -> Self {
        Self {
            store,
            filter: Filter::default(),
            activity: ActivityLog::default(),
        }
    }

    /// Sets how many activity entries are retained.
    #[must_use]
    pub fn with_activity_capacity(mut self, capacity: usize) -> Self {
        self.activity = ActivityLog::with_capacity(capacity);
        self
    }

    /// Read-only access to the store.
    #[must_use]
    pub const fn store(&self) -> &BoardStore {
        &self.store
    }

    /// The active filter.
    #[must_use]
    pub const fn filter(&self) -> &Filter {
        &self.filter
    }

    /// The activity feed, newest first.
    #[must_use]
    pub const fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Applies a command to the board.
    ///
    /// Every successful task or project mutation records exactly one
    /// activity entry. Filter changes and project selection record none.
    ///
    /// # Errors
    ///
    /// Returns the [`BoardError`] of the underlying store operation; the
    /// board and the activity log are unchanged in that case.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, BoardError> {
        let outcome = match command {
            Command::CreateTask(form) => {
                let (task, activity) = self.store.create_task(form)?;
                self.activity.record(activity);
                Outcome::TaskCreated(task)
            }
            Command::MoveTask { task_id, status } => {
                let activity = self.store.move_task(&task_id, &status)?;
                self.activity.record(activity);
                Outcome::TaskMoved(task_id)
            }
            Command::ArchiveTask(task_id) => {
                let activity = self.store.archive_task(&task_id)?;
                self.activity.record(activity);
                Outcome::TaskArchived(task_id)
            }
            Command::CompleteSubtask(task_id) => {
                let activity = self.store.complete_subtask(&task_id)?;
                self.activity.record(activity);
                Outcome::SubtaskCompleted(task_id)
            }
            Command::SelectProject(project_id) => {
                self.store.select_project(&project_id)?;
                Outcome::ProjectSelected(project_id)
            }
            Command::RemoveProject(project_id) => {
                let activity = self.store.remove_project(&project_id)?;
                self.activity.record(activity);
                Outcome::ProjectRemoved(self.store.current_project_id().cloned())
            }
            Command::Search(text) => {
                self.filter.set_search(&text);
                tracing::debug!(search = %self.filter.search(), "search changed");
                Outcome::FilterChanged
            }
            Command::ToggleDueToday => {
                let enabled = self.filter.toggle_due_today();
                tracing::debug!(enabled, "due-today filter toggled");
                Outcome::FilterChanged
            }
            Command::ClearActivity => {
                self.activity.clear();
                Outcome::ActivityCleared
            }
        };
        Ok(outcome)
    }

    /// Builds the view of the current project under the active filter.
    ///
    /// Returns `None` when no project is selected.
    #[must_use]
    pub fn board_view(&self) -> Option<BoardView<'_>> {
        let project = self.store.current_project()?;
        let today = self.store.today();
        let done_column = self.store.done_column();
        let columns = self
            .store
            .columns()
            .iter()
            .map(|column| ColumnView {
                column,
                tasks: list_visible_tasks(project, &column.id, &self.filter, today),
            })
            .collect();
        let metrics = compute_board_metrics(
            project,
            self.store.columns(),
            done_column,
            &self.filter,
            today,
        );

        Some(BoardView {
            project,
            columns,
            metrics,
            filter: &self.filter,
            done_column,
            today,
        })
    }

    /// Serializes the current project, ignoring filters.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoProjectSelected`] if no project remains, or
    /// [`BoardError::Export`] if serialization fails.
    pub fn export_current(&self) -> Result<ExportedProject, BoardError> {
        let project = self
            .store
            .current_project()
            .ok_or(BoardError::NoProjectSelected)?;
        let document = export::encode(project)?;
        tracing::info!(project_id = %project.id, bytes = document.len(), "project exported");
        Ok(ExportedProject {
            file_name: export::file_name(project),
            document,
        })
    }
}
