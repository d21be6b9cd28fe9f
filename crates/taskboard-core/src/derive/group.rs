//! Column grouping for the board's column view.
//!
//! Status columns partition tasks by exact status text. Category columns fan
//! out: a task with N categories lands in N columns, and only a task with no
//! categories lands in "Uncategorized".

use super::sort::sort_tasks;
use crate::model::{Category, Status, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Preferred display order for well-known statuses (matched ignoring case).
pub const STATUS_DISPLAY_ORDER: [&str; 3] = ["To Do", "In Progress", "Completed"];

/// Title of the catch-all category column.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Selects a category column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum CategoryKey {
    Id(i64),
    Uncategorized,
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Uncategorized => f.write_str("uncategorized"),
        }
    }
}

/// Identifies which column a group of tasks belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum ColumnKey {
    Status(String),
    Category(CategoryKey),
}

/// One rendered column: a heading and its sorted tasks.
#[derive(Debug, Clone, Serialize)]
pub struct Column<'a> {
    pub key: ColumnKey,
    pub title: String,
    /// Display color, for category columns that carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub tasks: Vec<&'a Task>,
}

impl Column<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// All tasks whose status is exactly `status_name`, sorted for display.
#[must_use]
pub fn tasks_for_status<'a>(tasks: &'a [Task], status_name: &str, now: DateTime<Utc>) -> Vec<&'a Task> {
    sort_tasks(tasks.iter().filter(|t| t.status == status_name), now)
}

/// All tasks belonging to a category column, sorted for display.
#[must_use]
pub fn tasks_for_category(tasks: &[Task], key: CategoryKey, now: DateTime<Utc>) -> Vec<&Task> {
    match key {
        CategoryKey::Uncategorized => sort_tasks(tasks.iter().filter(|t| t.is_uncategorized()), now),
        CategoryKey::Id(id) => sort_tasks(tasks.iter().filter(|t| t.has_category(id)), now),
    }
}

fn preferred_index(name: &str) -> Option<usize> {
    STATUS_DISPLAY_ORDER
        .iter()
        .position(|preferred| preferred.eq_ignore_ascii_case(name))
}

fn lexical(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Order statuses for display: well-known names first, the rest lexically.
#[must_use]
pub fn sorted_statuses(statuses: &[Status]) -> Vec<&Status> {
    let mut ordered: Vec<&Status> = statuses.iter().collect();
    ordered.sort_by(|a, b| match (preferred_index(&a.name), preferred_index(&b.name)) {
        (Some(ia), Some(ib)) => ia.cmp(&ib),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => lexical(&a.name, &b.name),
    });
    ordered
}

/// Tasks whose status matches none of the board's statuses.
///
/// These never appear in a status column; callers decide how to surface them.
#[must_use]
pub fn unplaced_tasks<'a>(tasks: &'a [Task], statuses: &[Status]) -> Vec<&'a Task> {
    let known: HashSet<&str> = statuses.iter().map(|s| s.name.as_str()).collect();
    tasks
        .iter()
        .filter(|t| !known.contains(t.status.as_str()))
        .collect()
}

/// One column per status, in display order.
#[must_use]
pub fn status_columns<'a>(
    tasks: &'a [Task],
    statuses: &[Status],
    now: DateTime<Utc>,
) -> Vec<Column<'a>> {
    sorted_statuses(statuses)
        .into_iter()
        .map(|status| Column {
            key: ColumnKey::Status(status.name.clone()),
            title: status.name.clone(),
            color: None,
            tasks: tasks_for_status(tasks, &status.name, now),
        })
        .collect()
}

/// One column per category in the given order, then "Uncategorized".
#[must_use]
pub fn category_columns<'a>(
    tasks: &'a [Task],
    categories: &[Category],
    now: DateTime<Utc>,
) -> Vec<Column<'a>> {
    let mut columns: Vec<Column<'a>> = categories
        .iter()
        .map(|category| Column {
            key: ColumnKey::Category(CategoryKey::Id(category.id)),
            title: category.value.clone(),
            color: Some(category.color.clone()).filter(|c| !c.is_empty()),
            tasks: tasks_for_category(tasks, CategoryKey::Id(category.id), now),
        })
        .collect();

    columns.push(Column {
        key: ColumnKey::Category(CategoryKey::Uncategorized),
        title: UNCATEGORIZED.to_string(),
        color: None,
        tasks: tasks_for_category(tasks, CategoryKey::Uncategorized, now),
    });
    columns
}
