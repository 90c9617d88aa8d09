//! Maps "today" to a competition day and its task.
//!
//! Three-tier fallback: remote store, then the compiled-in table, then an
//! out-of-range placeholder. A store failure is downgraded to the next tier
//! and never reaches the request handler. The answer is re-derived on every
//! call; no day number is cached between requests.
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    store::TaskStore,
    tasks::{fallback_task, CompetitionWindow, TaskRecord, COMPETITION_DAYS, DAY_ENDED, DAY_NOT_STARTED},
};

/// Resolves `today` against the window.
///
/// Before the window: day 0 with the "starts soon" sentinel. After it: day 8
/// with the "ended" sentinel. Inside it: day 1..=7, preferring the stored
/// record for that day and falling back to `table` when the store is absent,
/// unreachable, or has no document.
pub async fn resolve_day(
    today: NaiveDate,
    window: &CompetitionWindow,
    lookup: Option<&dyn TaskStore>,
    table: &[TaskRecord],
) -> (u8, TaskRecord) {
    if today < window.start {
        return (DAY_NOT_STARTED, TaskRecord::not_started());
    }
    if today > window.end {
        return (DAY_ENDED, TaskRecord::ended());
    }

    let day = (today - window.start).num_days() + 1;
    debug_assert!(
        (1..=i64::from(COMPETITION_DAYS)).contains(&day),
        "window validation must keep in-window days inside 1..=7"
    );
    let day = day as u8;

    if let Some(store) = lookup {
        match store.get_task(day).await {
            Ok(Some(task)) => return (day, task),
            Ok(None) => debug!("no stored task for day {day}, using built-in table"),
            Err(e) => warn!("task lookup failed for day {day}: {e}"),
        }
    }

    (day, fallback_task(table, day))
}
