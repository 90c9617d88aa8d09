//! # Daily Tasks
//!
//! The 7-day challenge schedule.
//!
//! The canonical task list lives in the remote store once seeded, but a
//! compiled-in copy is always kept here so the page never renders without a
//! task. Every day releases at 09:00 WAT and closes voting at 21:00 WAT.
use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// The competition always runs exactly this many days.
pub const COMPETITION_DAYS: u8 = 7;

pub const DAY_NOT_STARTED: u8 = 0;
pub const DAY_ENDED: u8 = 8;

const RELEASE_TIME: &str = "09:00 WAT";
const VOTING_CLOSE_TIME: &str = "21:00 WAT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub day: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting_close_time: Option<String>,
}

impl TaskRecord {
    fn daily(day: u8, title: &str, description: &str) -> Self {
        Self {
            day,
            date: None,
            title: title.to_string(),
            description: description.to_string(),
            release_time: Some(RELEASE_TIME.to_string()),
            voting_close_time: Some(VOTING_CLOSE_TIME.to_string()),
        }
    }

    fn sentinel(day: u8, title: &str, description: &str) -> Self {
        Self {
            day,
            date: None,
            title: title.to_string(),
            description: description.to_string(),
            release_time: None,
            voting_close_time: None,
        }
    }

    /// Placeholder shown before the window opens.
    pub fn not_started() -> Self {
        Self::sentinel(DAY_NOT_STARTED, "Competition starts soon", "Stay tuned for Day 1!")
    }

    /// Placeholder shown after the window closes.
    pub fn ended() -> Self {
        Self::sentinel(DAY_ENDED, "Competition has ended", "Thanks for participating!")
    }

    /// Last-resort placeholder for a day the table does not cover.
    pub fn unavailable(day: u8) -> Self {
        Self::sentinel(day, "No task available", "Check back later")
    }
}

/// Compiled-in fallback copy of the schedule, used whenever the store has no
/// answer. Exactly one entry per day 1..=7.
pub static FALLBACK_TASKS: LazyLock<[TaskRecord; COMPETITION_DAYS as usize]> =
    LazyLock::new(|| {
        [
            TaskRecord::daily(
                1,
                "Naija Throwback Dance Challenge",
                "60-second dance to a classic hit (e.g., P-Square)",
            ),
            TaskRecord::daily(
                2,
                "Jollof Wars: Cook-Off Edition",
                "Cook jollof with ₦500 in 10 minutes, taste it",
            ),
            TaskRecord::daily(
                3,
                "Nollywood Skit Showdown",
                "2-minute Nollywood skit (e.g., Cheating Husband)",
            ),
            TaskRecord::daily(
                4,
                "Afrobeat Freestyle Face-Off",
                "1-minute freestyle on a trending beat (e.g., Burna Boy)",
            ),
            TaskRecord::daily(
                5,
                "Owambe Fashion Flex",
                "Style an owambe outfit from home, 90-second catwalk",
            ),
            TaskRecord::daily(
                6,
                "Pidgin Proverbs Remix",
                "60-second pidgin skit/song from a proverb (e.g., Monkey no fine...)",
            ),
            TaskRecord::daily(7, "Lagos Hustle Pitch", "3-minute pitch as Smallie winner"),
        ]
    });

/// Table lookup with the out-of-range placeholder.
pub fn fallback_task(table: &[TaskRecord], day: u8) -> TaskRecord {
    table
        .iter()
        .find(|task| task.day == day)
        .cloned()
        .unwrap_or_else(|| TaskRecord::unavailable(day))
}

/// Inclusive date range the competition runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CompetitionWindow {
    /// Validates that the range is forward and spans exactly
    /// [`COMPETITION_DAYS`] days, since the schedule has a fixed task per day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Reversed { start, end });
        }

        let span = (end - start).num_days() + 1;
        if span != i64::from(COMPETITION_DAYS) {
            return Err(WindowError::WrongSpan { got: span });
        }

        Ok(Self { start, end })
    }

    /// Calendar date of a competition day, day 1 being the start date.
    pub fn date_for_day(&self, day: u8) -> NaiveDate {
        self.start + Days::new(u64::from(day.saturating_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn table_covers_every_day_exactly_once() {
        let days: Vec<u8> = FALLBACK_TASKS.iter().map(|t| t.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 7]);

        for task in FALLBACK_TASKS.iter() {
            assert!(!task.title.is_empty());
            assert_eq!(task.release_time.as_deref(), Some(RELEASE_TIME));
            assert_eq!(task.voting_close_time.as_deref(), Some(VOTING_CLOSE_TIME));
        }
    }

    #[test]
    fn fallback_lookup_out_of_range_yields_placeholder() {
        let task = fallback_task(&FALLBACK_TASKS[..], 9);
        assert_eq!(task.title, "No task available");
    }

    #[test]
    fn window_rejects_reversed_range() {
        let err = CompetitionWindow::new(date(2025, 4, 21), date(2025, 4, 15)).unwrap_err();
        assert!(matches!(err, WindowError::Reversed { .. }));
    }

    #[test]
    fn window_rejects_wrong_span() {
        let err = CompetitionWindow::new(date(2025, 4, 15), date(2025, 4, 25)).unwrap_err();
        assert_eq!(err, WindowError::WrongSpan { got: 11 });
    }

    #[test]
    fn window_maps_days_to_dates() {
        let window = CompetitionWindow::new(date(2025, 4, 15), date(2025, 4, 21)).unwrap();
        assert_eq!(window.date_for_day(1), date(2025, 4, 15));
        assert_eq!(window.date_for_day(7), date(2025, 4, 21));
    }
}
