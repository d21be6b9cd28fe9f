use serde::Serialize;
use std::fmt;

/// Column count above which the board switches to horizontal scrolling.
pub const MAX_GRID_COLUMNS: usize = 3;

/// How column view lays out its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Fixed grid, every column visible at once.
    Grid,
    /// Horizontally scrollable strip.
    Scroll,
}

impl Layout {
    #[must_use]
    pub const fn for_columns(column_count: usize) -> Self {
        if should_scroll(column_count) {
            Self::Scroll
        } else {
            Self::Grid
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Grid => "grid",
            Self::Scroll => "scroll",
        })
    }
}

#[must_use]
pub const fn should_scroll(column_count: usize) -> bool {
    column_count > MAX_GRID_COLUMNS
}
