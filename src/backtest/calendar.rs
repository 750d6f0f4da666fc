//! Day-by-day iteration over a half-open date range

use chrono::{Days, NaiveDate};

/// Yields every date in `[start, end)` in order
#[derive(Debug, Clone)]
pub struct DayRange {
    next: NaiveDate,
    end: NaiveDate,
}

impl DayRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { next: start, end }
    }

    /// Number of days left to yield
    pub fn remaining(&self) -> usize {
        (self.end - self.next).num_days().max(0) as usize
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        self.next = current.checked_add_days(Days::new(1))?;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}
