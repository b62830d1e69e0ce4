//! Integration tests for the line shell.
//!
//! Feeds scripted input through `shell::run` and inspects the printed
//! output and the files written by `export`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::Cursor;
use std::path::PathBuf;

use chrono::NaiveDate;

use kanboard::app::App;
use kanboard::board::seed::demo_projects;
use kanboard::board::{BoardStore, FixedClock, SequentialIds};
use kanboard::shell;
use kanboard_model::{Project, TaskId, export};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn make_app() -> App {
    let today = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
    let store = BoardStore::new(demo_projects())
        .with_id_generator(SequentialIds::new())
        .with_clock(FixedClock::on(today));
    App::new(store)
}

/// A fresh export directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kanboard-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Runs `script` against `app` and returns everything the shell printed.
fn run_script(app: &mut App, export_dir: &std::path::Path, script: &str) -> String {
    let mut output = Vec::new();
    shell::run(app, export_dir, Cursor::new(script), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

// ---------------------------------------------------------------------------
// Session behavior
// ---------------------------------------------------------------------------

#[test]
fn session_starts_with_board() {
    let mut app = make_app();
    let out = run_script(&mut app, &scratch_dir("start"), "");
    assert!(out.starts_with("== QuantumBoard · Dashboard == (Fri Nov 28)\n"));
    assert!(out.contains("Type `help` for commands."));
}

#[test]
fn add_and_move_update_board() {
    let mut app = make_app();
    let script = concat!(
        "add todo Write release notes; assignee=Dev C; label=feature; subtasks=draft, review\n",
        "move 7 done\n",
    );
    let out = run_script(&mut app, &scratch_dir("add"), script);

    assert!(out.contains("Created task \"Write release notes\"\n"));
    assert!(out.contains("Moved \"Write release notes\" \u{2192} done\n"));
    assert!(out.contains("  #7 Write release notes <feature> @Dev C due N/A (done)"));

    let task = app.store().task(&TaskId::new("7")).unwrap();
    assert_eq!(task.status.as_str(), "done");
    assert_eq!(task.subtasks, ["draft", "review"]);
    assert_eq!(app.activity().len(), 2);
}

#[test]
fn errors_are_reported_and_session_continues() {
    let mut app = make_app();
    let script = "add todo\n\
                  archive 404\n\
                  move 1 icebox\n\
                  fly\n\
                  add todo T; due=soon\n\
                  archive 1\n";
    let out = run_script(&mut app, &scratch_dir("errors"), script);

    assert!(out.contains("error: Task must have a title!\n"));
    assert!(out.contains("notice: task not found: 404\n"));
    assert!(out.contains("error: unknown column: icebox\n"));
    assert!(out.contains("error: unknown command: fly (try `help`)\n"));
    assert!(out.contains("error: invalid date: soon (expected YYYY-MM-DD)\n"));
    assert!(out.contains("Archived task #1\n"));
    assert_eq!(app.activity().len(), 1);
}

#[test]
fn quit_stops_reading() {
    let mut app = make_app();
    run_script(&mut app, &scratch_dir("quit"), "archive 1\nquit\narchive 2\n");
    assert!(app.store().task(&TaskId::new("1")).is_none());
    assert!(app.store().task(&TaskId::new("2")).is_some());
}

#[test]
fn filters_and_project_switching() {
    let mut app = make_app();
    let script = "select student-portal\ntoday\nprojects\n";
    let out = run_script(&mut app, &scratch_dir("filters"), script);

    assert!(out.contains("filter: due today\n"));
    assert!(out.contains("Tasks 1 \u{b7} Overdue 0 \u{b7} Done 0"));
    assert!(out.contains("* Student Portal Revamp (student-portal) [2]\n"));
    assert!(app.activity().is_empty());
}

#[test]
fn removing_every_project_reports_no_selection() {
    let mut app = make_app();
    let script = "remove-project quantum-dashboard\n\
                  remove-project student-portal\n\
                  add todo Orphan\n\
                  board\n";
    let out = run_script(&mut app, &scratch_dir("remove"), script);

    assert!(out.contains("Removed project \"Student Portal Revamp\"\n"));
    assert!(out.contains("error: no project selected\n"));
    assert!(out.ends_with("No project selected\n"));
}

#[test]
fn activity_and_clear() {
    let mut app = make_app();
    let out = run_script(
        &mut app,
        &scratch_dir("activity"),
        "done-subtask 1\nactivity\nclear-activity\nactivity\n",
    );
    let entry = "12:00:00  Completed subtask \"Layout\" of \"Set up authentication UI\"\n";
    assert!(out.contains(entry));
    assert!(out.contains("activity cleared\n"));
    assert!(out.ends_with("No activity yet\n"));
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_writes_named_json_file() {
    let mut app = make_app();
    let dir = scratch_dir("export");
    let out = run_script(&mut app, &dir, "search nothing\nexport\n");

    let path = dir.join("QuantumBoard · Dashboard.json");
    assert!(out.contains(&format!("exported to {}\n", path.display())));

    let document = std::fs::read_to_string(&path).unwrap();
    let project = export::decode(&document).unwrap();
    assert_eq!(&project, app.store().current_project().unwrap());

    let value: serde_json::Value = serde_json::from_str(&document).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["id", "name", "tasks"]);
    assert_eq!(value["tasks"].as_array().unwrap().len(), 4);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn export_without_project_fails_cleanly() {
    let mut app = make_app();
    let dir = scratch_dir("export-none");
    let script = "remove-project quantum-dashboard\nremove-project student-portal\nexport\n";
    let out = run_script(&mut app, &dir, script);
    assert!(out.contains("error: export failed: no project selected\n"));
    assert!(!dir.exists());
}

#[test]
fn export_stays_inside_export_dir() {
    let today = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
    let store = BoardStore::new(vec![Project::new("p", "../team/board")])
        .with_clock(FixedClock::on(today));
    let mut app = App::new(store);
    let dir = scratch_dir("export-nested");

    let out = run_script(&mut app, &dir, "export\n");

    let path = dir.join("..-team-board.json");
    assert!(out.contains(&format!("exported to {}\n", path.display())));
    assert!(path.is_file());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}
