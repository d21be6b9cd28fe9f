//! End-to-end derivation scenarios over a realistic board payload.
//!
//! Each test decodes the same JSON the backend serves and checks what a user
//! would see in list view or column view.

use chrono::{DateTime, TimeZone, Utc};
use taskboard_core::access::diff_usernames;
use taskboard_core::derive::{
    BoardSnapshot, BoardView, CategoryKey, Grouping, Layout, ListFilter, StatusFilter, ViewConfig,
    apply_list_filters, derive_view, should_scroll, sort_tasks, sorted_statuses,
    tasks_for_category,
};
use taskboard_core::model::board::{BoardPayload, CategoryPayload, StatusPayload};
use taskboard_core::model::{Status, Task};

const BOARD: &str = r##"{
  "status": "ok",
  "member_id": 1,
  "workspace_id": 1,
  "board": {
    "id": 4,
    "name": "Launch",
    "workspaceId": 1,
    "workspaceName": "Product",
    "users": [{"id": 1, "username": "ana"}, {"id": 2, "username": "bo"}],
    "taskCount": 6,
    "tasks": [
      {"id": 10, "title": "Write docs", "priority": "low", "status": "To Do",
       "dueDate": "2025-01-10", "categories": [{"id": 1, "value": "Docs", "color": "#aaa"}]},
      {"id": 11, "title": "Fix login", "priority": "critical", "status": "To Do",
       "dueDate": "2099-01-01", "categories": [{"id": 2, "value": "Backend", "color": "#bbb"}]},
      {"id": 12, "title": "Old migration", "priority": "low", "status": "in-progress",
       "dueDate": "2020-01-01", "categories": []},
      {"id": 13, "title": "Ship beta", "priority": "high", "status": "In Progress",
       "dueDate": "2099-06-01",
       "categories": [{"id": 1, "value": "Docs", "color": "#aaa"}, {"id": 2, "value": "Backend", "color": "#bbb"}]},
      {"id": 14, "title": "Retro", "priority": "medium", "status": "Completed",
       "dueDate": "2020-02-02"},
      {"id": 15, "title": "Someday", "priority": "medium", "status": "To Do"}
    ]
  }
}"##;

const STATUSES: &str = r#"{"status": "ok", "statuses": [
  {"id": 3, "name": "Completed"},
  {"id": 1, "name": "To Do"},
  {"id": 9, "name": "Custom"},
  {"id": 2, "name": "In Progress"}
]}"#;

const CATEGORIES: &str = r##"{"status": "ok", "categories": [
  {"id": 1, "value": "Docs", "color": "#aaa"},
  {"id": 2, "value": "Backend", "color": "#bbb"}
]}"##;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
}

fn snapshot() -> BoardSnapshot {
    let board = serde_json::from_str::<BoardPayload>(BOARD)
        .unwrap()
        .into_board();
    BoardSnapshot {
        tasks: board.tasks,
        statuses: serde_json::from_str::<StatusPayload>(STATUSES)
            .unwrap()
            .into_statuses(),
        categories: serde_json::from_str::<CategoryPayload>(CATEGORIES)
            .unwrap()
            .into_categories(),
    }
}

fn ids(tasks: &[&Task]) -> Vec<i64> {
    tasks.iter().map(|t| t.id).collect()
}

#[test]
fn list_view_orders_overdue_then_priority_then_date() {
    let snap = snapshot();
    let sorted = sort_tasks(&snap.tasks, now());
    // 12 and 10 are overdue (12: low, 2020; 10: low, 2025); 14 is overdue but completed.
    assert_eq!(ids(&sorted), vec![12, 10, 11, 13, 14, 15]);
}

#[test]
fn unfiltered_list_matches_sorted_board() {
    let snap = snapshot();
    let view = derive_view(&snap, &ViewConfig::default(), now());
    let BoardView::List { tasks } = view else {
        panic!("default view is the list");
    };
    assert_eq!(ids(&tasks), ids(&sort_tasks(&snap.tasks, now())));
}

#[test]
fn category_filter_keeps_multi_category_tasks() {
    let snap = snapshot();
    let filter = ListFilter::new(StatusFilter::All, [2]);
    let filtered = apply_list_filters(&snap.tasks, &filter);
    assert_eq!(ids(&filtered), vec![11, 13]);
}

#[test]
fn status_and_category_filters_combine() {
    let snap = snapshot();
    let config = ViewConfig::list(ListFilter::new(StatusFilter::Exact("To Do".into()), [1, 2]));
    let BoardView::List { tasks } = derive_view(&snap, &config, now()) else {
        panic!("list view expected");
    };
    assert_eq!(ids(&tasks), vec![10, 11]);
}

#[test]
fn status_columns_hide_unknown_statuses_but_report_them() {
    let snap = snapshot();
    let BoardView::Columns {
        layout,
        columns,
        unplaced,
        ..
    } = derive_view(&snap, &ViewConfig::columns(Grouping::Status), now())
    else {
        panic!("column view expected");
    };
    let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["To Do", "In Progress", "Completed", "Custom"]);
    assert_eq!(layout, Layout::Scroll);
    assert_eq!(ids(&columns[0].tasks), vec![10, 11, 15]);
    assert_eq!(ids(&columns[1].tasks), vec![13]);
    assert!(columns[3].is_empty());
    // "in-progress" is not a board status
    assert_eq!(ids(&unplaced), vec![12]);
}

#[test]
fn category_columns_fan_out_and_collect_uncategorized() {
    let snap = snapshot();
    assert_eq!(
        ids(&tasks_for_category(&snap.tasks, CategoryKey::Id(1), now())),
        vec![10, 13]
    );
    assert_eq!(
        ids(&tasks_for_category(&snap.tasks, CategoryKey::Id(2), now())),
        vec![11, 13]
    );
    let uncategorized = tasks_for_category(&snap.tasks, CategoryKey::Uncategorized, now());
    assert_eq!(ids(&uncategorized), vec![12, 14, 15]);
    assert!(uncategorized.iter().all(|t| t.categories.is_empty()));

    let view = derive_view(&snap, &ViewConfig::columns(Grouping::Category), now());
    let BoardView::Columns { layout, columns, .. } = view else {
        panic!("column view expected");
    };
    assert_eq!(columns.len(), 3);
    assert_eq!(layout, Layout::Grid);
}

#[test]
fn preferred_status_order() {
    let statuses: Vec<Status> = ["Completed", "To Do", "Custom", "In Progress"]
        .iter()
        .zip(1..)
        .map(|(name, id)| Status {
            id,
            name: (*name).to_string(),
        })
        .collect();
    let names: Vec<&str> = sorted_statuses(&statuses)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["To Do", "In Progress", "Completed", "Custom"]);
}

#[test]
fn layout_threshold() {
    assert!(!should_scroll(3));
    assert!(should_scroll(4));
}

#[test]
fn access_diff_examples() {
    let to_vec = |xs: &[&str]| xs.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
    let delta = diff_usernames(&to_vec(&["a", "b"]), &to_vec(&["b", "c"]));
    assert_eq!(delta.to_add, to_vec(&["c"]));
    assert_eq!(delta.to_remove, to_vec(&["a"]));

    let same = diff_usernames(&to_vec(&["a"]), &to_vec(&["a"]));
    assert!(same.is_noop());
}
