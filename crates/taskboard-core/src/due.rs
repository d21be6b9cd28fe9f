//! Due-date parsing and the derived "past due" flag.
//!
//! Dates arrive as free text. A bare `YYYY-MM-DD` is read as midnight UTC of
//! that day, the same instant a browser assigns to an ISO date-only string.
//! Naive date-times without an offset are also read as UTC. Anything that does
//! not parse has no due date as far as sorting and flagging are concerned.

use crate::model::Task;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a due date into an instant, or `None` if absent or malformed.
#[must_use]
pub fn parse_due_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// The task's parsed due date, if it has a usable one.
#[must_use]
pub fn due_instant(task: &Task) -> Option<DateTime<Utc>> {
    task.due_date.as_deref().and_then(parse_due_date)
}

/// `true` when `status` is exactly "completed", ignoring case only.
#[must_use]
pub fn is_completed_status(status: &str) -> bool {
    status.eq_ignore_ascii_case("completed")
}

/// A task is past due when its due date has elapsed and it is not completed.
#[must_use]
pub fn is_past_due(task: &Task, now: DateTime<Utc>) -> bool {
    if is_completed_status(&task.status) {
        return false;
    }
    due_instant(task).is_some_and(|due| due < now)
}
