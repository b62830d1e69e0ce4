//! Shared domain types and the project export format for `Kanboard`.

pub mod export;
pub mod project;
pub mod task;

pub use project::{Column, ColumnId, Project, ProjectId, default_columns};
pub use task::{Comment, Label, ParseLabelError, Task, TaskId};
