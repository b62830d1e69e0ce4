//! Pure queries over board state: visible tasks, metrics, due dates.
//!
//! Nothing here mutates. "Today" is always passed in, so every function is
//! deterministic for a given input.

use chrono::NaiveDate;
use kanboard_model::{Column, ColumnId, Project, Task};

/// Search and due-date filters applied to every column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    search: String,
    due_today: bool,
}

impl Filter {
    /// Creates a filter. The search text is trimmed and lowercased.
    #[must_use]
    pub fn new(search: &str, due_today: bool) -> Self {
        let mut filter = Self {
            search: String::new(),
            due_today,
        };
        filter.set_search(search);
        filter
    }

    /// Replaces the search text. An empty string clears the search.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
    }

    /// The normalized search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether only tasks due today are shown.
    #[must_use]
    pub const fn due_today(&self) -> bool {
        self.due_today
    }

    /// Flips the due-today filter and returns its new state.
    pub const fn toggle_due_today(&mut self) -> bool {
        self.due_today = !self.due_today;
        self.due_today
    }

    /// Returns `true` if any filter narrows the board.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.due_today
    }

    /// Returns `true` if `task` passes both filters.
    #[must_use]
    pub fn admits(&self, task: &Task, today: NaiveDate) -> bool {
        matches_search(task, &self.search) && (!self.due_today || is_due_today(task.due, today))
    }
}

/// Task counts shown above the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardMetrics {
    /// Visible tasks across all columns.
    pub total: usize,
    /// Visible tasks past due and not done.
    pub overdue_count: usize,
    /// Visible tasks in the done column.
    pub done_count: usize,
}

/// Due-date badge state of a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    /// Due date has passed. Takes precedence over [`DueState::Done`].
    Overdue,
    /// Task sits in the done column.
    Done,
    /// Neither overdue nor done.
    Normal,
}

/// Returns `true` if `date` is a calendar day strictly before `today`.
///
/// An absent date is never overdue.
#[must_use]
pub fn is_overdue(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    date.is_some_and(|d| d < today)
}

/// Returns `true` if `date` is exactly `today`.
#[must_use]
pub fn is_due_today(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    date == Some(today)
}

/// Case-insensitive substring match against title, description, or assignee.
///
/// An empty query matches every task.
#[must_use]
pub fn matches_search(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    [&task.title, &task.description, &task.assignee]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Tasks of `project` in `column` that pass `filter`, in insertion order.
#[must_use]
pub fn list_visible_tasks<'a>(
    project: &'a Project,
    column: &ColumnId,
    filter: &Filter,
    today: NaiveDate,
) -> Vec<&'a Task> {
    project
        .tasks
        .iter()
        .filter(|t| &t.status == column && filter.admits(t, today))
        .collect()
}

/// Counts visible tasks across `columns`.
///
/// Tasks whose status matches no column are never visible and never counted.
#[must_use]
pub fn compute_board_metrics(
    project: &Project,
    columns: &[Column],
    done_column: &ColumnId,
    filter: &Filter,
    today: NaiveDate,
) -> BoardMetrics {
    columns
        .iter()
        .flat_map(|column| list_visible_tasks(project, &column.id, filter, today))
        .fold(BoardMetrics::default(), |mut metrics, task| {
            let done = &task.status == done_column;
            metrics.total += 1;
            if done {
                metrics.done_count += 1;
            } else if is_overdue(task.due, today) {
                metrics.overdue_count += 1;
            }
            metrics
        })
}

/// Classifies the due-date badge of a task card.
#[must_use]
pub fn due_state(task: &Task, done_column: &ColumnId, today: NaiveDate) -> DueState {
    if is_overdue(task.due, today) {
        DueState::Overdue
    } else if &task.status == done_column {
        DueState::Done
    } else {
        DueState::Normal
    }
}
