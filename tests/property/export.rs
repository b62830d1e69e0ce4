//! Property-based export round-trip tests.
//!
//! Uses proptest to verify:
//! 1. Any project survives export → decode unchanged.
//! 2. Export never introduces keys beyond the entity fields.
//! 3. Arbitrary text never panics the decoder.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{DateTime, NaiveDate, Utc};
use kanboard_model::export;
use kanboard_model::{ColumnId, Comment, Label, Project, ProjectId, Task, TaskId};
use proptest::prelude::*;

const TASK_KEYS: [&str; 10] = [
    "assignee",
    "comments",
    "description",
    "due",
    "id",
    "label",
    "status",
    "subtasks",
    "subtasksCompleted",
    "title",
];

fn arb_label() -> impl Strategy<Value = Label> {
    prop::sample::select(Label::ALL.to_vec())
}

fn arb_due() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of(
        (1970i32..2100, 1u32..=12, 1u32..=28)
            .prop_filter_map("valid date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
    )
}

fn arb_time() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800_000).prop_filter_map("valid timestamp", DateTime::from_timestamp_millis)
}

fn arb_comment() -> impl Strategy<Value = Comment> {
    (".{0,64}", arb_time()).prop_map(|(text, time)| Comment { text, time })
}

fn arb_status() -> impl Strategy<Value = ColumnId> {
    prop::sample::select(vec!["todo", "inprogress", "review", "done"]).prop_map(ColumnId::new)
}

prop_compose! {
    fn arb_task()(
        id in "[0-9a-f]{1,16}",
        title in "[^\x00]{1,64}",
        description in ".{0,128}",
        assignee in ".{0,32}",
        due in arb_due(),
        status in arb_status(),
        label in arb_label(),
        subtasks in prop::collection::vec("[^,]{1,16}", 0..5),
        comments in prop::collection::vec(arb_comment(), 0..3),
    ) -> Task {
        let completed = u32::try_from(subtasks.len() / 2).unwrap_or(0);
        Task {
            id: TaskId::new(id),
            title,
            description,
            assignee,
            due,
            status,
            label,
            subtasks,
            subtasks_completed: completed,
            comments,
        }
    }
}

prop_compose! {
    fn arb_project()(
        id in "[a-z-]{1,24}",
        name in ".{1,48}",
        tasks in prop::collection::vec(arb_task(), 0..8),
    ) -> Project {
        Project { id: ProjectId::new(id), name, tasks }
    }
}

proptest! {
    /// Any project survives an export → decode round-trip.
    #[test]
    fn project_round_trip(project in arb_project()) {
        let document = export::encode(&project).expect("encode should succeed");
        let decoded = export::decode(&document).expect("decode should succeed");
        prop_assert_eq!(project, decoded);
    }

    /// The export document carries only entity fields.
    #[test]
    fn export_introduces_no_fields(project in arb_project()) {
        let document = export::encode(&project).expect("encode should succeed");
        let value: serde_json::Value = serde_json::from_str(&document).expect("valid json");
        let object = value.as_object().expect("project object");
        prop_assert_eq!(object.len(), 3);
        for task in value["tasks"].as_array().expect("task array") {
            for key in task.as_object().expect("task object").keys() {
                prop_assert!(TASK_KEYS.contains(&key.as_str()), "unexpected key {}", key);
            }
        }
    }

    /// Arbitrary text never panics the decoder.
    #[test]
    fn random_text_decode_no_panic(text in ".{0,256}") {
        let _ = export::decode(&text);
    }
}
