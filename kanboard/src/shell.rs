//! Line-oriented command shell.
//!
//! Parses one command per input line into a [`ShellCommand`] and runs it
//! against an [`App`]. Parse errors are reported back to the user and never
//! reach the board.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use kanboard_model::{ColumnId, Label, ParseLabelError, ProjectId, TaskId};

use crate::app::{App, Command, Outcome};
use crate::board::{BoardError, NewTask};
use crate::render;

/// Errors produced while parsing a command line.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShellError {
    /// The first word names no command.
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    /// A required argument is missing.
    #[error("usage: {0}")]
    Usage(&'static str),
    /// A due date is not `YYYY-MM-DD`.
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    /// A label is not one of the fixed set.
    #[error(transparent)]
    InvalidLabel(#[from] ParseLabelError),
    /// An `add` field is not recognized.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// A board command for [`App::dispatch`].
    Dispatch(Command),
    /// Print the board.
    Board,
    /// Print the project list.
    Projects,
    /// Print the activity feed.
    Activity,
    /// Write the current project to the export directory.
    Export,
    /// Print the help text.
    Help,
    /// Leave the shell.
    Quit,
}

const ADD_USAGE: &str = "add <column> <title>[; key=value]...";

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`ShellError`] describing what is wrong with the line.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));
    let mut args = rest.split_whitespace();

    let command = match word {
        "board" => ShellCommand::Board,
        "projects" => ShellCommand::Projects,
        "activity" => ShellCommand::Activity,
        "export" => ShellCommand::Export,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        "today" => ShellCommand::Dispatch(Command::ToggleDueToday),
        "clear-activity" => ShellCommand::Dispatch(Command::ClearActivity),
        "search" => ShellCommand::Dispatch(Command::Search(rest.to_string())),
        "select" => {
            let id = args.next().ok_or(ShellError::Usage("select <project-id>"))?;
            ShellCommand::Dispatch(Command::SelectProject(ProjectId::new(id)))
        }
        "remove-project" => {
            let id = args
                .next()
                .ok_or(ShellError::Usage("remove-project <project-id>"))?;
            ShellCommand::Dispatch(Command::RemoveProject(ProjectId::new(id)))
        }
        "move" => {
            let usage = || ShellError::Usage("move <task-id> <column>");
            let task_id = args.next().ok_or_else(usage)?;
            let status = args.next().ok_or_else(usage)?;
            ShellCommand::Dispatch(Command::MoveTask {
                task_id: TaskId::new(task_id),
                status: ColumnId::new(status),
            })
        }
        "archive" => {
            let id = args.next().ok_or(ShellError::Usage("archive <task-id>"))?;
            ShellCommand::Dispatch(Command::ArchiveTask(TaskId::new(id)))
        }
        "done-subtask" => {
            let id = args
                .next()
                .ok_or(ShellError::Usage("done-subtask <task-id>"))?;
            ShellCommand::Dispatch(Command::CompleteSubtask(TaskId::new(id)))
        }
        "add" => ShellCommand::Dispatch(Command::CreateTask(parse_add(rest)?)),
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Parses the arguments of `add` into creation form values.
///
/// An empty title is passed through; the board rejects it.
fn parse_add(rest: &str) -> Result<NewTask, ShellError> {
    let (column, remainder) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));
    if column.is_empty() {
        return Err(ShellError::Usage(ADD_USAGE));
    }

    let mut segments = remainder.split(';');
    let title = segments.next().unwrap_or_default();
    let mut form = NewTask::new(column, title);

    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| ShellError::UnknownField(segment.to_string()))?;
        let value = value.trim();
        match key.trim() {
            "desc" | "description" => form.description = value.to_string(),
            "assignee" => form.assignee = value.to_string(),
            "due" => form.due = parse_due(value)?,
            "label" => form.label = value.parse::<Label>()?,
            "subtasks" => form.subtasks = value.to_string(),
            "comment" => form.comment = value.to_string(),
            other => return Err(ShellError::UnknownField(other.to_string())),
        }
    }
    Ok(form)
}

fn parse_due(value: &str) -> Result<Option<NaiveDate>, ShellError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ShellError::InvalidDate(value.to_string()))
}

/// Runs a parsed command and returns the text to show the user.
#[must_use]
pub fn execute(app: &mut App, export_dir: &Path, command: ShellCommand) -> String {
    match command {
        ShellCommand::Board => board_text(app),
        ShellCommand::Projects => render::projects(&app.store().project_summaries()),
        ShellCommand::Activity => render::activity(app.activity()),
        ShellCommand::Help => render::help(),
        ShellCommand::Quit => String::new(),
        ShellCommand::Export => match export(app, export_dir) {
            Ok(path) => format!("exported to {}\n", path.display()),
            Err(e) => format!("error: export failed: {e}\n"),
        },
        ShellCommand::Dispatch(command) => match app.dispatch(command) {
            Ok(outcome) => outcome_text(app, &outcome),
            Err(BoardError::TitleEmpty) => "error: Task must have a title!\n".to_string(),
            Err(e) if e.is_not_found() => {
                tracing::debug!(error = %e, "command ignored");
                format!("notice: {e}\n")
            }
            Err(e) => format!("error: {e}\n"),
        },
    }
}

fn outcome_text(app: &App, outcome: &Outcome) -> String {
    match outcome {
        _ if !outcome.changes_board() => "activity cleared\n".to_string(),
        Outcome::FilterChanged | Outcome::ProjectSelected(_) => board_text(app),
        _ => {
            let mut text = app
                .activity()
                .latest()
                .map(|entry| format!("{}\n", entry.message))
                .unwrap_or_default();
            text.push_str(&board_text(app));
            text
        }
    }
}

fn board_text(app: &App) -> String {
    app.board_view()
        .map_or_else(|| "No project selected\n".to_string(), |view| render::board(&view))
}

/// Writes the current project to `<export_dir>/<project name>.json`.
///
/// # Errors
///
/// Returns an I/O error if the document cannot be produced or written.
pub fn export(app: &App, export_dir: &Path) -> io::Result<PathBuf> {
    let exported = app.export_current().map_err(io::Error::other)?;
    std::fs::create_dir_all(export_dir)?;
    let path = export_dir.join(&exported.file_name);
    std::fs::write(&path, exported.document)?;
    tracing::info!(path = %path.display(), "export written");
    Ok(path)
}

/// Reads commands from `input` until end of input or `quit`.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
pub fn run<R: BufRead, W: Write>(
    app: &mut App,
    export_dir: &Path,
    input: R,
    mut output: W,
) -> io::Result<()> {
    write!(output, "{}", board_text(app))?;
    writeln!(output, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => write!(output, "{}", execute(app, export_dir, command))?,
            Err(e) => writeln!(output, "error: {e}")?,
        }
        output.flush()?;
    }
    Ok(())
}
