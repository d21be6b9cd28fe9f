//! The top-level view derivation: one call from board data plus view settings
//! to the sequences a renderer draws.

use super::filter::{ListFilter, apply_list_filters};
use super::group::{Column, category_columns, status_columns, unplaced_tasks};
use super::layout::Layout;
use super::sort::sort_tasks;
use crate::model::task::normalize;
use crate::model::{Category, ParseEnumError, Status, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::debug;

/// Board rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Columns,
}

/// Column grouping, meaningful only in [`ViewMode::Columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    Status,
    Category,
}

impl ViewMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Columns => "columns",
        }
    }
}

impl Grouping {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "list" => Ok(Self::List),
            "columns" | "column" | "board" => Ok(Self::Columns),
            _ => Err(ParseEnumError {
                expected: "view mode",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Grouping {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "status" => Ok(Self::Status),
            "category" => Ok(Self::Category),
            _ => Err(ParseEnumError {
                expected: "grouping",
                got: s.to_string(),
            }),
        }
    }
}

/// Immutable view settings for one derivation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub mode: ViewMode,
    #[serde(default)]
    pub grouping: Grouping,
    #[serde(default)]
    pub filter: ListFilter,
}

impl ViewConfig {
    #[must_use]
    pub fn list(filter: ListFilter) -> Self {
        Self {
            mode: ViewMode::List,
            grouping: Grouping::default(),
            filter,
        }
    }

    #[must_use]
    pub fn columns(grouping: Grouping) -> Self {
        Self {
            mode: ViewMode::Columns,
            grouping,
            filter: ListFilter::default(),
        }
    }
}

/// Everything loaded for one board before a view is derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    pub statuses: Vec<Status>,
    pub categories: Vec<Category>,
}

/// Result of a derivation, borrowing from the snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BoardView<'a> {
    List {
        tasks: Vec<&'a Task>,
    },
    Columns {
        grouping: Grouping,
        layout: Layout,
        columns: Vec<Column<'a>>,
        /// Tasks with a status no column shows (status grouping only).
        #[serde(skip_serializing_if = "Vec::is_empty")]
        unplaced: Vec<&'a Task>,
    },
}

impl BoardView<'_> {
    /// Number of task placements; category fan-out counts each placement.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        match self {
            Self::List { tasks } => tasks.len(),
            Self::Columns { columns, .. } => columns.iter().map(Column::len).sum(),
        }
    }
}

/// Derive what to render for `snapshot` under `config` at instant `now`.
#[must_use]
pub fn derive_view<'a>(
    snapshot: &'a BoardSnapshot,
    config: &ViewConfig,
    now: DateTime<Utc>,
) -> BoardView<'a> {
    let view = match config.mode {
        ViewMode::List => {
            let sorted = sort_tasks(&snapshot.tasks, now);
            BoardView::List {
                tasks: apply_list_filters(sorted, &config.filter),
            }
        }
        ViewMode::Columns => {
            let (columns, unplaced) = match config.grouping {
                Grouping::Status => (
                    status_columns(&snapshot.tasks, &snapshot.statuses, now),
                    unplaced_tasks(&snapshot.tasks, &snapshot.statuses),
                ),
                Grouping::Category => (
                    category_columns(&snapshot.tasks, &snapshot.categories, now),
                    Vec::new(),
                ),
            };
            BoardView::Columns {
                grouping: config.grouping,
                layout: Layout::for_columns(columns.len()),
                columns,
                unplaced,
            }
        }
    };

    debug!(
        mode = %config.mode,
        tasks = snapshot.tasks.len(),
        placements = view.placement_count(),
        "derived board view"
    );
    view
}
