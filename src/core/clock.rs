//! Calendar date source.
//!
//! Streak and daily-lesson logic work on device-local calendar dates, never
//! instants. The clock is injected so tests can cross day boundaries.

use std::sync::RwLock;

use chrono::{Days, Local, NaiveDate};

/// Source of "today" as a local calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the device's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a date that tests can move.
#[derive(Debug)]
pub struct FixedClock {
    date: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: RwLock::new(date),
        }
    }

    /// Pin the clock to `date`.
    pub fn set(&self, date: NaiveDate) {
        *self.date.write().unwrap() = date;
    }

    /// Move the clock forward by `days`.
    pub fn advance_days(&self, days: u64) {
        let mut date = self.date.write().unwrap();
        *date = date.checked_add_days(Days::new(days)).unwrap_or(*date);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.read().unwrap()
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
