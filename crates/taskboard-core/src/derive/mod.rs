//! Board view derivation.
//!
//! Pure functions from a board's tasks (plus its statuses and categories) and
//! a [`ViewConfig`] to the ordered sequences a renderer shows:
//!
//! - [`sort`]: past-due first, then priority rank, then due date.
//! - [`filter`]: list-view status and category filters.
//! - [`group`]: status and category columns for column view.
//! - [`layout`]: grid vs. scrolling choice from the column count.
//! - [`view`]: ties the above together behind [`derive_view`].
//!
//! Nothing here mutates its inputs or reads the clock; `now` is a parameter.

pub mod filter;
pub mod group;
pub mod layout;
pub mod sort;
pub mod view;

pub use filter::{ListFilter, StatusFilter, apply_list_filters};
pub use group::{
    CategoryKey, Column, ColumnKey, category_columns, sorted_statuses, status_columns,
    tasks_for_category, tasks_for_status, unplaced_tasks,
};
pub use layout::{Layout, should_scroll};
pub use sort::sort_tasks;
pub use view::{BoardSnapshot, BoardView, Grouping, ViewConfig, ViewMode, derive_view};
