//! Plain-text rendering of the board, project list, and activity feed.

use std::fmt::Write as _;

use kanboard_model::{Label, Task};

use crate::app::BoardView;
use crate::board::{ActivityLog, DueState, ProjectSummary, due_state};

/// Subtask chips longer than this are shortened.
const SUBTASK_CHIP_MAX: usize = 14;
/// Characters kept from a shortened subtask chip.
const SUBTASK_CHIP_KEEP: usize = 12;

/// Renders the board: header, metrics, then each column with its cards.
#[must_use]
pub fn board(view: &BoardView<'_>) -> String {
    let mut out = String::new();
    let today = view.today.format("%a %b %-d");
    let _ = writeln!(out, "== {} == ({today})", view.project.name);

    if view.filter.is_active() {
        let mut filters = Vec::new();
        if !view.filter.search().is_empty() {
            filters.push(format!("search \"{}\"", view.filter.search()));
        }
        if view.filter.due_today() {
            filters.push("due today".to_string());
        }
        let _ = writeln!(out, "filter: {}", filters.join(", "));
    }

    let _ = writeln!(
        out,
        "Tasks {} \u{b7} Overdue {} \u{b7} Done {}",
        view.metrics.total, view.metrics.overdue_count, view.metrics.done_count
    );

    for column in &view.columns {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}] {}", column.column.title, column.tasks.len());
        if column.tasks.is_empty() {
            let _ = writeln!(out, "  No tasks here");
        }
        for task in &column.tasks {
            card(&mut out, task, view);
        }
    }
    out
}

fn card(out: &mut String, task: &Task, view: &BoardView<'_>) {
    let mut line = format!("  #{} {}", task.id, task.title);
    if task.label != Label::None {
        let _ = write!(line, " <{}>", task.label);
    }
    let _ = write!(line, " @{}", task.assignee);

    let due = task
        .due
        .map_or_else(|| "N/A".to_string(), |d| d.format("%Y-%m-%d").to_string());
    match due_state(task, view.done_column, view.today) {
        DueState::Overdue => {
            let _ = write!(line, " due {due} (overdue)");
        }
        DueState::Done => {
            let _ = write!(line, " due {due} (done)");
        }
        DueState::Normal => {
            let _ = write!(line, " due {due}");
        }
    }
    let _ = writeln!(out, "{line}");

    if !task.description.is_empty() {
        let _ = writeln!(out, "      {}", task.description);
    }
    if !task.subtasks.is_empty() {
        let chips: Vec<_> = task.subtasks.iter().map(|s| subtask_chip(s)).collect();
        let _ = writeln!(
            out,
            "      [{}] {}/{} ({}%)",
            chips.join("] ["),
            task.subtasks_completed,
            task.subtasks.len(),
            task.progress_percent()
        );
    }
    let _ = writeln!(out, "      {} comments", task.comments.len());
}

/// Shortens a subtask name for its chip.
#[must_use]
pub fn subtask_chip(name: &str) -> String {
    if name.chars().count() > SUBTASK_CHIP_MAX {
        let kept: String = name.chars().take(SUBTASK_CHIP_KEEP).collect();
        format!("{kept}\u{2026}")
    } else {
        name.to_string()
    }
}

/// Renders the project list, marking the current project.
#[must_use]
pub fn projects(summaries: &[ProjectSummary]) -> String {
    if summaries.is_empty() {
        return "No projects\n".to_string();
    }
    let mut out = String::new();
    for summary in summaries {
        let marker = if summary.is_current { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {} ({}) [{}]",
            summary.name, summary.id, summary.task_count
        );
    }
    out
}

/// Renders the activity feed, newest first.
#[must_use]
pub fn activity(log: &ActivityLog) -> String {
    if log.is_empty() {
        return "No activity yet\n".to_string();
    }
    let mut out = String::new();
    for entry in log.iter() {
        let _ = writeln!(out, "{}  {}", entry.timestamp.format("%H:%M:%S"), entry.message);
    }
    out
}

/// Renders the shell help text.
#[must_use]
pub fn help() -> String {
    "\
Commands:
  board                          show the current board
  projects                       list projects
  select <project-id>            switch project
  remove-project <project-id>    delete a project and its tasks
  add <column> <title>[; key=value]...
                                 create a task (keys: desc, assignee, due,
                                 label, subtasks, comment)
  move <task-id> <column>        move a task to another column
  archive <task-id>              delete a task
  done-subtask <task-id>         tick off the next subtask
  search [text]                  filter by title, description, assignee
  today                          toggle the due-today filter
  activity                       show recent activity
  clear-activity                 empty the activity feed
  export                         write the current project as JSON
  help                           show this help
  quit                           exit
"
    .to_string()
}
