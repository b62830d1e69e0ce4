//! Task id generation.
//!
//! The store asks an [`IdGenerator`] for every new task id and re-draws if
//! the id is already taken, so ids stay unique even when tasks are created
//! faster than a clock tick.

use kanboard_model::TaskId;
use uuid::Uuid;

/// Source of fresh task identifiers.
pub trait IdGenerator {
    /// Returns the next candidate id.
    fn next_id(&mut self) -> TaskId;
}

/// Generates time-ordered UUID v7 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Ids;

impl IdGenerator for UuidV7Ids {
    fn next_id(&mut self) -> TaskId {
        TaskId::new(Uuid::now_v7().to_string())
    }
}

/// Generates decimal ids from a monotonic counter.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Creates a counter whose first id is `1`.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a counter whose first id is `first`.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TaskId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        TaskId::new(id.to_string())
    }
}
