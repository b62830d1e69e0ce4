//! Single-board kanban task tracker library.

pub mod app;
pub mod board;
pub mod config;
pub mod render;
pub mod shell;
