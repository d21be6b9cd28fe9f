//! List-view filters. Column view never applies these.

use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sentinel text meaning "do not filter by status".
pub const ALL_STATUSES: &str = "all";

/// Status filter: everything, or one exact status string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Exact(String),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(&self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_STATUSES {
            Ok(Self::All)
        } else {
            Ok(Self::Exact(s.to_string()))
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_STATUSES),
            Self::Exact(status) => f.write_str(status),
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Combined list-view filter. Both halves must pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListFilter {
    #[serde(default)]
    pub status: StatusFilter,
    /// Empty means no category filtering; otherwise any overlap passes.
    #[serde(default)]
    pub category_ids: BTreeSet<i64>,
}

impl ListFilter {
    #[must_use]
    pub fn new(status: StatusFilter, category_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            status,
            category_ids: category_ids.into_iter().collect(),
        }
    }

    /// `true` when this filter lets every task through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == StatusFilter::All && self.category_ids.is_empty()
    }

    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.matches(&task.status) {
            return false;
        }
        self.category_ids.is_empty()
            || task
                .categories
                .iter()
                .any(|c| self.category_ids.contains(&c.id))
    }
}

/// Keep the tasks that pass `filter`, in their original relative order.
#[must_use]
pub fn apply_list_filters<'a, I>(tasks: I, filter: &ListFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().filter(|task| filter.matches(task)).collect()
}
