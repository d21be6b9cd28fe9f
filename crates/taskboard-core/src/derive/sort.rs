//! Board ordering: past-due first, then priority rank, then due date.

use crate::due::{due_instant, is_past_due};
use crate::model::{Priority, Task};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// Sort key for a single task.
///
/// Tuple order is the precedence order. `Option<DateTime>` sorts `None` first,
/// so the missing flag comes ahead of the date to push undated tasks last.
type SortKey = (Reverse<bool>, Priority, bool, Option<DateTime<Utc>>);

fn sort_key(task: &Task, now: DateTime<Utc>) -> SortKey {
    let due = due_instant(task);
    (Reverse(is_past_due(task, now)), task.priority, due.is_none(), due)
}

/// Order tasks for display without touching the source collection.
///
/// Tasks without a parseable due date sort after every dated task within
/// their priority band and keep their relative input order (the sort is
/// stable).
#[must_use]
pub fn sort_tasks<'a, I>(tasks: I, now: DateTime<Utc>) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut ordered: Vec<&Task> = tasks.into_iter().collect();
    ordered.sort_by_cached_key(|task| sort_key(task, now));
    ordered
}
