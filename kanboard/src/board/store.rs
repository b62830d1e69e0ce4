//! Board store: the single owner of projects, columns, and selection.
//!
//! `BoardStore` is the only path to mutate tasks. Lookups hand out shared
//! references only; every change goes through an operation that validates
//! its input first and returns an [`Activity`] on success.

use chrono::{DateTime, NaiveDate, Utc};
use kanboard_model::{
    Column, ColumnId, Comment, Label, Project, ProjectId, Task, TaskId, default_columns,
};

use super::BoardError;
use super::activity::Activity;
use super::clock::{Clock, SystemClock};
use super::ids::{IdGenerator, UuidV7Ids};

/// Assignee used when the creation form leaves it blank.
pub const DEFAULT_ASSIGNEE: &str = "You";

/// Raw field values collected by the task creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Title; trimmed, must be non-empty.
    pub title: String,
    /// Description; trimmed.
    pub description: String,
    /// Assignee; blank falls back to the store's default identity.
    pub assignee: String,
    /// Optional due date.
    pub due: Option<NaiveDate>,
    /// Label chip.
    pub label: Label,
    /// Column the task is created in.
    pub status: ColumnId,
    /// Comma-separated subtask names.
    pub subtasks: String,
    /// Optional first comment.
    pub comment: String,
}

impl NewTask {
    /// Starts a form for `title` in column `status`, other fields blank.
    #[must_use]
    pub fn new(status: impl Into<ColumnId>, title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            assignee: String::new(),
            due: None,
            label: Label::None,
            status: status.into(),
            subtasks: String::new(),
            comment: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn assignee(mut self, name: &str) -> Self {
        self.assignee = name.to_string();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn due(mut self, date: NaiveDate) -> Self {
        self.due = Some(date);
        self
    }

    /// Sets the label.
    #[must_use]
    pub const fn label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    /// Sets the comma-separated subtask text.
    #[must_use]
    pub fn subtasks(mut self, text: &str) -> Self {
        self.subtasks = text.to_string();
        self
    }

    /// Sets the first comment.
    #[must_use]
    pub fn comment(mut self, text: &str) -> Self {
        self.comment = text.to_string();
        self
    }
}

/// One row of the project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Number of tasks in the project, ignoring filters.
    pub task_count: usize,
    /// Whether this is the current project.
    pub is_current: bool,
}

/// Splits comma-separated subtask text, trimming names and dropping blanks.
#[must_use]
pub fn split_subtasks(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Owns every project and performs all task mutations.
pub struct BoardStore {
    projects: Vec<Project>,
    /// Always names an existing project, or `None` once all are removed.
    current: Option<ProjectId>,
    columns: Vec<Column>,
    done_column: ColumnId,
    default_assignee: String,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl BoardStore {
    /// Creates a store over `projects` with the default four columns.
    ///
    /// The first project becomes current.
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        let current = projects.first().map(|p| p.id.clone());
        Self {
            projects,
            current,
            columns: default_columns(),
            done_column: ColumnId::new("done"),
            default_assignee: DEFAULT_ASSIGNEE.to_string(),
            ids: Box::new(UuidV7Ids),
            clock: Box::new(SystemClock::new()),
        }
    }

    /// Replaces the column set and the terminal column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownColumn`] if `done_column` is not among
    /// `columns`, or [`BoardError::UnmappedStatus`] for the first task of any
    /// project whose status names no column in `columns`.
    pub fn with_columns(
        mut self,
        columns: Vec<Column>,
        done_column: ColumnId,
    ) -> Result<Self, BoardError> {
        let known = |id: &ColumnId| columns.iter().any(|c| &c.id == id);
        if !known(&done_column) {
            return Err(BoardError::UnknownColumn(done_column.to_string()));
        }
        if let Some(task) = self
            .projects
            .iter()
            .flat_map(|p| &p.tasks)
            .find(|t| !known(&t.status))
        {
            return Err(BoardError::UnmappedStatus {
                task_id: task.id.to_string(),
                status: task.status.to_string(),
            });
        }
        self.columns = columns;
        self.done_column = done_column;
        Ok(self)
    }

    /// Sets the assignee used for blank creation forms.
    #[must_use]
    pub fn with_default_assignee(mut self, name: &str) -> Self {
        self.default_assignee = name.to_string();
        self
    }

    /// Replaces the task id generator.
    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // --- read-only accessors ---

    /// All projects in display order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a project by id.
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// The current project, if any remain.
    #[must_use]
    pub fn current_project(&self) -> Option<&Project> {
        self.project(self.current.as_ref()?)
    }

    /// Id of the current project.
    #[must_use]
    pub const fn current_project_id(&self) -> Option<&ProjectId> {
        self.current.as_ref()
    }

    /// Looks up a task in the current project.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.current_project()?.task(id)
    }

    /// Configured columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The terminal column.
    #[must_use]
    pub const fn done_column(&self) -> &ColumnId {
        &self.done_column
    }

    /// Current instant according to the store's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Today's date according to the store's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// One summary row per project, in display order.
    #[must_use]
    pub fn project_summaries(&self) -> Vec<ProjectSummary> {
        self.projects
            .iter()
            .map(|p| ProjectSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                task_count: p.tasks.len(),
                is_current: self.current.as_ref() == Some(&p.id),
            })
            .collect()
    }

    // --- mutations ---

    /// Creates a task in the current project from raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TitleEmpty`] if the trimmed title is empty,
    /// [`BoardError::NoProjectSelected`] if no project remains, or
    /// [`BoardError::UnknownColumn`] if the target column is not configured.
    pub fn create_task(&mut self, form: NewTask) -> Result<(Task, Activity), BoardError> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(BoardError::TitleEmpty);
        }
        let index = self.current_index()?;
        self.ensure_column(&form.status)?;

        let now = self.clock.now();
        let assignee = match form.assignee.trim() {
            "" => self.default_assignee.clone(),
            name => name.to_string(),
        };
        let comment = form.comment.trim();
        let comments = if comment.is_empty() {
            Vec::new()
        } else {
            vec![Comment {
                text: comment.to_string(),
                time: now,
            }]
        };

        let task = Task {
            id: self.fresh_id(),
            title: title.to_string(),
            description: form.description.trim().to_string(),
            assignee,
            due: form.due,
            status: form.status,
            label: form.label,
            subtasks: split_subtasks(&form.subtasks),
            subtasks_completed: 0,
            comments,
        };

        self.projects[index].tasks.push(task.clone());
        tracing::info!(task_id = %task.id, status = %task.status, "task created");

        let activity = Activity::new(format!("Created task \"{}\"", task.title), now);
        Ok((task, activity))
    }

    /// Moves a task of the current project to another column.
    ///
    /// Any column may follow any other; moving to the current column is
    /// allowed and still recorded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownColumn`], [`BoardError::NoProjectSelected`],
    /// or [`BoardError::TaskNotFound`].
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        status: &ColumnId,
    ) -> Result<Activity, BoardError> {
        self.ensure_column(status)?;
        let now = self.clock.now();
        let task = self.task_mut(task_id)?;
        let from = std::mem::replace(&mut task.status, status.clone());
        tracing::info!(task_id = %task_id, from = %from, to = %status, "task moved");

        Ok(Activity::new(
            format!("Moved \"{}\" \u{2192} {status}", task.title),
            now,
        ))
    }

    /// Removes a task from the current project for good.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoProjectSelected`] or [`BoardError::TaskNotFound`].
    /// A repeated archive of the same id fails with `TaskNotFound` and leaves
    /// the board as the first call did.
    pub fn archive_task(&mut self, task_id: &TaskId) -> Result<Activity, BoardError> {
        let index = self.current_index()?;
        let tasks = &mut self.projects[index].tasks;
        let position = tasks
            .iter()
            .position(|t| &t.id == task_id)
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
        tasks.remove(position);
        tracing::info!(task_id = %task_id, "task archived");

        Ok(Activity::new(
            format!("Archived task #{task_id}"),
            self.clock.now(),
        ))
    }

    /// Marks the next subtask of a task complete.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoProjectSelected`], [`BoardError::TaskNotFound`],
    /// or [`BoardError::SubtasksComplete`] if nothing is left to complete.
    pub fn complete_subtask(&mut self, task_id: &TaskId) -> Result<Activity, BoardError> {
        let now = self.clock.now();
        let task = self.task_mut(task_id)?;
        if task.subtasks_done() {
            return Err(BoardError::SubtasksComplete(task_id.to_string()));
        }
        let name = usize::try_from(task.subtasks_completed)
            .ok()
            .and_then(|i| task.subtasks.get(i))
            .cloned()
            .unwrap_or_default();
        task.subtasks_completed += 1;
        tracing::debug!(
            task_id = %task_id,
            completed = task.subtasks_completed,
            "subtask completed"
        );

        Ok(Activity::new(
            format!("Completed subtask \"{name}\" of \"{}\"", task.title),
            now,
        ))
    }

    /// Makes `project_id` the current project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ProjectNotFound`] if no such project exists.
    pub fn select_project(&mut self, project_id: &ProjectId) -> Result<(), BoardError> {
        if self.project(project_id).is_none() {
            return Err(BoardError::ProjectNotFound(project_id.to_string()));
        }
        self.current = Some(project_id.clone());
        tracing::debug!(project_id = %project_id, "project selected");
        Ok(())
    }

    /// Discards a project and all of its tasks.
    ///
    /// Removing the current project selects the first remaining one, or
    /// leaves no project selected when none remain.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ProjectNotFound`] if no such project exists.
    pub fn remove_project(&mut self, project_id: &ProjectId) -> Result<Activity, BoardError> {
        let position = self
            .projects
            .iter()
            .position(|p| &p.id == project_id)
            .ok_or_else(|| BoardError::ProjectNotFound(project_id.to_string()))?;
        let removed = self.projects.remove(position);

        if self.current.as_ref() == Some(project_id) {
            self.current = self.projects.first().map(|p| p.id.clone());
            tracing::info!(
                removed = %project_id,
                current = ?self.current.as_ref().map(ProjectId::as_str),
                "current project removed"
            );
        }

        Ok(Activity::new(
            format!("Removed project \"{}\"", removed.name),
            self.clock.now(),
        ))
    }

    // --- internal helpers ---

    fn current_index(&self) -> Result<usize, BoardError> {
        let current = self.current.as_ref().ok_or(BoardError::NoProjectSelected)?;
        self.projects
            .iter()
            .position(|p| &p.id == current)
            .ok_or(BoardError::NoProjectSelected)
    }

    fn task_mut(&mut self, task_id: &TaskId) -> Result<&mut Task, BoardError> {
        let index = self.current_index()?;
        self.projects[index]
            .tasks
            .iter_mut()
            .find(|t| &t.id == task_id)
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))
    }

    fn ensure_column(&self, status: &ColumnId) -> Result<(), BoardError> {
        if self.columns.iter().any(|c| &c.id == status) {
            Ok(())
        } else {
            Err(BoardError::UnknownColumn(status.to_string()))
        }
    }

    /// Draws ids until one is unused anywhere on the board.
    fn fresh_id(&mut self) -> TaskId {
        loop {
            let id = self.ids.next_id();
            if !self.projects.iter().any(|p| p.contains(&id)) {
                return id;
            }
            tracing::debug!(task_id = %id, "generated task id already taken");
        }
    }
}
