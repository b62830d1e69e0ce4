//! Activity entries produced by board mutations.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Default number of entries an [`ActivityLog`] retains.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 50;

/// A human-readable record of one successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// What happened, e.g. `Moved "Wireframes" → review`.
    pub message: String,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    /// Creates an activity entry.
    #[must_use]
    pub const fn new(message: String, timestamp: DateTime<Utc>) -> Self {
        Self { message, timestamp }
    }
}

/// Append-only activity feed, newest entry first.
///
/// Once `capacity` entries are held, recording a new one drops the oldest.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
    capacity: usize,
}

impl ActivityLog {
    /// Creates an empty log holding at most `capacity` entries (minimum 1).
    ///
    /// Storage grows on demand; only the default amount is reserved up front.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_ACTIVITY_CAPACITY)),
            capacity,
        }
    }

    /// Records an entry at the front of the feed.
    pub fn record(&mut self, activity: Activity) {
        self.entries.push_front(activity);
        self.entries.truncate(self.capacity);
    }

    /// Iterates entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&Activity> {
        self.entries.front()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ACTIVITY_CAPACITY)
    }
}
