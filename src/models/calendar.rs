//! Business-day calendar.
//!
//! Resolves which calendar days are open for maintenance work. A day is a
//! business day iff its day of week is in the open-days set; an empty set
//! means Monday to Friday.
//!
//! # Termination
//! The walkers loop until the predicate holds. A predicate that never holds
//! does not terminate; [`BusinessCalendar`] cannot express one because an
//! empty open-days set falls back to the default week.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Monday to Friday.
pub const DEFAULT_OPEN_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Returns the first date on or after `date` that is a business day.
pub fn advance_to_business_day<F>(date: NaiveDate, is_business_day: F) -> NaiveDate
where
    F: Fn(Weekday) -> bool,
{
    if is_business_day(date.weekday()) {
        date
    } else {
        next_business_day(date, is_business_day)
    }
}

/// Returns the first business day strictly after `date`.
///
/// Saturates at [`NaiveDate::MAX`]: past it there is no later date, so
/// `NaiveDate::MAX` is returned even when it is not a business day, and
/// repeated calls keep returning it. Callers stepping day by day (the
/// capacity allocator) would then reuse that date. Plans never get near
/// the end of the calendar in practice.
pub fn next_business_day<F>(date: NaiveDate, is_business_day: F) -> NaiveDate
where
    F: Fn(Weekday) -> bool,
{
    let mut current = date;
    loop {
        current = match current.succ_opt() {
            Some(next) => next,
            None => return current,
        };
        if is_business_day(current.weekday()) {
            return current;
        }
    }
}

/// Open days of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    /// Days of the week on which work can be scheduled.
    pub open_days: Vec<Weekday>,
}

impl BusinessCalendar {
    /// Creates a calendar from an open-days set.
    ///
    /// An empty set yields the Monday-to-Friday default.
    pub fn new(open_days: &[Weekday]) -> Self {
        if open_days.is_empty() {
            return Self::default();
        }
        let mut days = Vec::with_capacity(open_days.len());
        for day in open_days {
            if !days.contains(day) {
                days.push(*day);
            }
        }
        Self { open_days: days }
    }

    /// Whether a day of week is open.
    #[inline]
    pub fn is_business_day(&self, weekday: Weekday) -> bool {
        if self.open_days.is_empty() {
            DEFAULT_OPEN_DAYS.contains(&weekday)
        } else {
            self.open_days.contains(&weekday)
        }
    }

    /// Whether a calendar date falls on an open day.
    pub fn is_open(&self, date: NaiveDate) -> bool {
        self.is_business_day(date.weekday())
    }

    /// First business day on or after `date`.
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        advance_to_business_day(date, |w| self.is_business_day(w))
    }

    /// First business day strictly after `date`.
    pub fn next(&self, date: NaiveDate) -> NaiveDate {
        next_business_day(date, |w| self.is_business_day(w))
    }

    /// `count` consecutive business days, starting at the first one on or after `start`.
    pub fn business_days(&self, start: NaiveDate, count: usize) -> Vec<NaiveDate> {
        let mut days = Vec::with_capacity(count);
        let mut current = self.advance(start);
        for i in 0..count {
            if i > 0 {
                current = self.next(current);
            }
            days.push(current);
        }
        days
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self {
            open_days: DEFAULT_OPEN_DAYS.to_vec(),
        }
    }
}
