//! Integration tests for board mutations, queries, and project selection.
//!
//! Drives the board through `App::dispatch` and checks the resulting
//! `BoardView`, activity feed, and store state.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::similar_names)]

use chrono::NaiveDate;

use kanboard::app::{App, Command, Outcome};
use kanboard::board::seed::demo_projects;
use kanboard::board::{
    BoardError, BoardStore, Filter, FixedClock, NewTask, SequentialIds, compute_board_metrics,
    is_due_today, list_visible_tasks,
};
use kanboard_model::{Column, ColumnId, Label, Project, ProjectId, Task, TaskId, default_columns};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    day(2025, 11, 28)
}

/// Creates an app over the demo projects with deterministic ids and time.
fn make_app() -> App {
    let store = BoardStore::new(demo_projects())
        .with_id_generator(SequentialIds::new())
        .with_clock(FixedClock::on(today()));
    App::new(store)
}

/// Snapshot of `(id, status)` for every task of the current project.
fn statuses(app: &App) -> Vec<(String, String)> {
    app.store()
        .current_project()
        .unwrap()
        .tasks
        .iter()
        .map(|t| (t.id.to_string(), t.status.to_string()))
        .collect()
}

fn current_tasks(app: &App) -> Vec<Task> {
    app.store().current_project().unwrap().tasks.clone()
}

fn move_cmd(task_id: &str, status: &str) -> Command {
    Command::MoveTask {
        task_id: TaskId::new(task_id),
        status: ColumnId::new(status),
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[test]
fn move_changes_only_target_task() {
    let mut app = make_app();
    let before = statuses(&app);

    app.dispatch(move_cmd("1", "done")).unwrap();

    let after = statuses(&app);
    for ((id, old), (_, new)) in before.iter().zip(&after) {
        if id == "1" {
            assert_eq!(new, "done");
        } else {
            assert_eq!(old, new, "task {id} must not move");
        }
    }
}

#[test]
fn move_unknown_task_leaves_board_unchanged() {
    let mut app = make_app();
    let before = current_tasks(&app);

    let err = app.dispatch(move_cmd("999", "done")).unwrap_err();

    assert_eq!(err, BoardError::TaskNotFound("999".to_string()));
    assert_eq!(current_tasks(&app), before);
    assert!(app.activity().is_empty());
}

#[test]
fn archive_removes_exactly_one_then_nothing() {
    let mut app = make_app();

    app.dispatch(Command::ArchiveTask(TaskId::new("3"))).unwrap();
    let after_first = current_tasks(&app);
    assert_eq!(after_first.len(), 3);
    assert!(after_first.iter().all(|t| t.id.as_str() != "3"));

    let err = app
        .dispatch(Command::ArchiveTask(TaskId::new("3")))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(current_tasks(&app), after_first);
    assert_eq!(app.activity().len(), 1);
}

#[test]
fn create_with_blank_title_is_rejected() {
    let mut app = make_app();
    let before = current_tasks(&app);

    for title in ["", "   ", "\t\n"] {
        let err = app
            .dispatch(Command::CreateTask(NewTask::new("todo", title)))
            .unwrap_err();
        assert_eq!(err, BoardError::TitleEmpty);
    }

    assert_eq!(current_tasks(&app), before);
}

#[test]
fn create_splits_subtasks_and_appends() {
    let mut app = make_app();
    let form = NewTask::new("review", "  Write tests ")
        .subtasks("a, b ,,c")
        .label(Label::Feature)
        .due(day(2025, 12, 5));

    let Outcome::TaskCreated(task) = app.dispatch(Command::CreateTask(form)).unwrap() else {
        panic!("expected TaskCreated");
    };

    assert_eq!(task.title, "Write tests");
    assert_eq!(task.subtasks, ["a", "b", "c"]);
    assert_eq!(task.subtasks_completed, 0);
    assert_eq!(task.assignee, "You");
    assert_eq!(task.id.as_str(), "7");
    assert_eq!(current_tasks(&app).last(), Some(&task));
    assert_eq!(
        app.activity().latest().unwrap().message,
        "Created task \"Write tests\""
    );
}

#[test]
fn complete_subtask_advances_progress() {
    let mut app = make_app();
    app.dispatch(Command::CompleteSubtask(TaskId::new("3")))
        .unwrap();

    let task = app.store().task(&TaskId::new("3")).unwrap().clone();
    assert_eq!(task.subtasks_completed, 1);
    assert_eq!(task.progress_percent(), 50);

    app.dispatch(Command::CompleteSubtask(TaskId::new("3")))
        .unwrap();
    let err = app
        .dispatch(Command::CompleteSubtask(TaskId::new("3")))
        .unwrap_err();
    assert_eq!(err, BoardError::SubtasksComplete("3".to_string()));
    assert_eq!(app.store().task(&TaskId::new("3")).unwrap().progress_percent(), 100);
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn overdue_excludes_done_column() {
    let yesterday = Some(day(2025, 11, 27));
    let mut project = Project::new("p", "P");
    let mut late = demo_projects()[0].tasks[0].clone();
    late.id = TaskId::new("a");
    late.status = ColumnId::new("todo");
    late.due = yesterday;
    let mut finished = late.clone();
    finished.id = TaskId::new("b");
    finished.status = ColumnId::new("done");
    project.tasks = vec![late, finished];

    let metrics = compute_board_metrics(
        &project,
        &default_columns(),
        &ColumnId::new("done"),
        &Filter::default(),
        today(),
    );

    assert_eq!(metrics.total, 2);
    assert_eq!(metrics.overdue_count, 1);
    assert_eq!(metrics.done_count, 1);
}

#[test]
fn search_applies_to_every_column() {
    let mut app = make_app();
    app.dispatch(Command::Search("  DEPLOY ".to_string()))
        .unwrap();

    let view = app.board_view().unwrap();
    let visible: Vec<&str> = view
        .columns
        .iter()
        .flat_map(|c| c.tasks.iter().map(|t| t.id.as_str()))
        .collect();
    assert_eq!(visible, ["4"]);
    assert_eq!(view.metrics.total, 1);

    let project = app.store().current_project().unwrap();
    for column in app.store().columns() {
        for task in list_visible_tasks(project, &column.id, app.filter(), today()) {
            let haystack = format!("{} {} {}", task.title, task.description, task.assignee);
            assert!(haystack.to_lowercase().contains("deploy"));
        }
    }
}

#[test]
fn due_today_compares_calendar_days() {
    assert!(is_due_today(Some(today()), today()));
    assert!(!is_due_today(Some(day(2025, 11, 27)), today()));
    assert!(!is_due_today(Some(day(2024, 11, 28)), today()));
    assert!(!is_due_today(None, today()));
}

#[test]
fn custom_columns_must_cover_every_task() {
    let columns = vec![Column::new("todo", "Backlog"), Column::new("shipped", "Shipped")];
    let result = BoardStore::new(demo_projects()).with_columns(columns, ColumnId::new("shipped"));
    assert_eq!(
        result.err(),
        Some(BoardError::UnmappedStatus {
            task_id: "1".to_string(),
            status: "inprogress".to_string(),
        })
    );
}

#[test]
fn custom_columns_drive_the_board() {
    let mut columns = default_columns();
    columns.push(Column::new("shipped", "Shipped"));
    let store = BoardStore::new(demo_projects())
        .with_columns(columns, ColumnId::new("shipped"))
        .unwrap()
        .with_id_generator(SequentialIds::new())
        .with_clock(FixedClock::on(today()));
    let mut app = App::new(store);

    let err = app.dispatch(move_cmd("2", "icebox")).unwrap_err();
    assert_eq!(err, BoardError::UnknownColumn("icebox".to_string()));

    app.dispatch(move_cmd("2", "shipped")).unwrap();
    let view = app.board_view().unwrap();
    assert_eq!(view.columns.len(), 5);
    assert_eq!(view.metrics.total, 4);
    assert_eq!(view.metrics.done_count, 1);
}

// ---------------------------------------------------------------------------
// Project selection
// ---------------------------------------------------------------------------

#[test]
fn mutations_only_touch_current_project() {
    let mut app = make_app();
    app.dispatch(Command::SelectProject(ProjectId::new("student-portal")))
        .unwrap();

    let err = app.dispatch(move_cmd("1", "done")).unwrap_err();
    assert!(err.is_not_found());

    app.dispatch(Command::CreateTask(NewTask::new("todo", "Survey")))
        .unwrap();
    let summaries = app.store().project_summaries();
    assert_eq!(summaries[0].task_count, 4);
    assert_eq!(summaries[1].task_count, 3);
    assert!(summaries[1].is_current);
}

#[test]
fn removing_current_falls_back_then_empties() {
    let mut app = make_app();

    let outcome = app
        .dispatch(Command::RemoveProject(ProjectId::new("quantum-dashboard")))
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::ProjectRemoved(Some(ProjectId::new("student-portal")))
    );
    assert_eq!(app.store().projects().len(), 1);

    app.dispatch(Command::RemoveProject(ProjectId::new("student-portal")))
        .unwrap();
    assert!(app.store().current_project().is_none());
    assert!(app.board_view().is_none());

    let err = app
        .dispatch(Command::CreateTask(NewTask::new("todo", "Orphan")))
        .unwrap_err();
    assert_eq!(err, BoardError::NoProjectSelected);
    let err = app.dispatch(move_cmd("5", "done")).unwrap_err();
    assert_eq!(err, BoardError::NoProjectSelected);
}

#[test]
fn selecting_unknown_project_keeps_current() {
    let mut app = make_app();
    let err = app
        .dispatch(Command::SelectProject(ProjectId::new("nope")))
        .unwrap_err();
    assert_eq!(err, BoardError::ProjectNotFound("nope".to_string()));
    assert_eq!(
        app.store().current_project_id(),
        Some(&ProjectId::new("quantum-dashboard"))
    );
}

// ---------------------------------------------------------------------------
// Activity feed
// ---------------------------------------------------------------------------

#[test]
fn activity_is_newest_first_and_bounded() {
    let mut app = make_app().with_activity_capacity(3);
    for (id, status) in [("1", "done"), ("2", "review"), ("3", "todo"), ("4", "todo")] {
        app.dispatch(move_cmd(id, status)).unwrap();
    }

    let messages: Vec<&str> = app.activity().iter().map(|a| a.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "Moved \"Deploy build\" \u{2192} todo",
            "Moved \"Task comments section\" \u{2192} todo",
            "Moved \"Project list screen\" \u{2192} review",
        ]
    );
}
