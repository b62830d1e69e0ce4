//! Wall-clock access for the board.
//!
//! Due-date checks work on calendar days, so a clock supplies both the
//! current instant (comment and activity timestamps) and "today".

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Source of the current time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns today's calendar date.
    fn today(&self) -> NaiveDate;
}

/// The system clock, with "today" taken in the local time zone.
///
/// `today` can be pinned to a fixed date, e.g. to browse a board whose due
/// dates were set around some other day.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock {
    pinned_today: Option<NaiveDate>,
}

impl SystemClock {
    /// Creates a clock that follows the system time.
    #[must_use]
    pub const fn new() -> Self {
        Self { pinned_today: None }
    }

    /// Pins the calendar date while keeping real timestamps.
    #[must_use]
    pub const fn with_pinned_today(mut self, today: Option<NaiveDate>) -> Self {
        self.pinned_today = today;
        self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// A clock frozen at a single instant. Today is the UTC date of that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Freezes the clock at `now`.
    #[must_use]
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Freezes the clock at noon UTC on `date`.
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        Self::at(date.and_time(noon).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
