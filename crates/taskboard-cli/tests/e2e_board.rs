//! E2E tests for the read-only and dry-run surface of `tb`.
//!
//! Each test writes board exports into an isolated temp directory and runs
//! the binary against them; nothing here talks to a backend.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

const BOARD: &str = r##"{
  "status": "ok",
  "board": {
    "id": 4,
    "name": "Launch",
    "workspaceId": 1,
    "workspaceName": "Product",
    "users": [{"id": 1, "username": "ana"}],
    "tasks": [
      {"id": 1, "title": "Write docs", "priority": "low", "status": "To Do",
       "dueDate": "2026-01-10", "categories": [{"id": 1, "value": "Docs", "color": "#aaa"}]},
      {"id": 2, "title": "Fix login", "priority": "critical", "status": "To Do",
       "dueDate": "2026-12-01", "categories": [{"id": 2, "value": "Backend", "color": "#bbb"}]},
      {"id": 3, "title": "Ship beta", "priority": "high", "status": "In Progress",
       "categories": [{"id": 1, "value": "Docs", "color": "#aaa"}, {"id": 2, "value": "Backend", "color": "#bbb"}]},
      {"id": 4, "title": "Retro", "priority": "medium", "status": "Completed",
       "dueDate": "2026-01-01", "categories": []},
      {"id": 5, "title": "Legacy", "priority": "medium", "status": "Archived"}
    ]
  }
}"##;

const STATUSES: &str = r#"[
  {"id": 3, "name": "Completed"},
  {"id": 9, "name": "Blocked"},
  {"id": 1, "name": "To Do"},
  {"id": 2, "name": "In Progress"}
]"#;

const NOW: &str = "2026-06-01T00:00:00Z";

/// Build a Command targeting the tb binary, rooted in `dir`.
fn tb_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tb"));
    cmd.current_dir(dir);
    // Keep user config and env overrides out of the test.
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env_remove("FORMAT");
    cmd.env_remove("TASKBOARD_API_BASE");
    cmd.env("TASKBOARD_LOG", "error");
    cmd
}

struct Fixture {
    dir: TempDir,
    board: PathBuf,
    statuses: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("temp dir");
    let board = dir.path().join("board.json");
    let statuses = dir.path().join("statuses.json");
    std::fs::write(&board, BOARD).expect("write board");
    std::fs::write(&statuses, STATUSES).expect("write statuses");
    Fixture {
        dir,
        board,
        statuses,
    }
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = tb_cmd(dir).args(args).arg("--json").output().expect("tb runs");
    assert!(
        output.status.success(),
        "tb {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

fn ids(tasks: &Value) -> Vec<i64> {
    tasks
        .as_array()
        .expect("task array")
        .iter()
        .map(|t| t["id"].as_i64().expect("task id"))
        .collect()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

// ---------------------------------------------------------------------------
// view
// ---------------------------------------------------------------------------

#[test]
fn list_view_sorts_past_due_first() {
    let fx = fixture();
    let json = run_json(
        fx.dir.path(),
        &["view", "--board-file", path_str(&fx.board), "--now", NOW],
    );
    assert_eq!(json["mode"], "list");
    assert_eq!(json["now"], "2026-06-01T00:00:00Z");
    // 1 is overdue; 4 is overdue but completed.
    assert_eq!(ids(&json["tasks"]), vec![1, 2, 3, 4, 5]);
}

#[test]
fn list_view_applies_status_and_category_filters() {
    let fx = fixture();
    let json = run_json(
        fx.dir.path(),
        &[
            "view",
            "--board-file",
            path_str(&fx.board),
            "--now",
            NOW,
            "--status",
            "To Do",
            "--category",
            "2",
        ],
    );
    assert_eq!(ids(&json["tasks"]), vec![2]);
}

#[test]
fn status_columns_follow_display_order_and_scroll() {
    let fx = fixture();
    let json = run_json(
        fx.dir.path(),
        &[
            "view",
            "--board-file",
            path_str(&fx.board),
            "--statuses-file",
            path_str(&fx.statuses),
            "--mode",
            "columns",
            "--now",
            NOW,
        ],
    );
    assert_eq!(json["mode"], "columns");
    assert_eq!(json["layout"], "scroll");
    let titles: Vec<&str> = json["columns"]
        .as_array()
        .expect("columns")
        .iter()
        .map(|c| c["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["To Do", "In Progress", "Completed", "Blocked"]);
    assert_eq!(ids(&json["columns"][0]["tasks"]), vec![1, 2]);
    assert_eq!(ids(&json["unplaced"]), vec![5]);
}

#[test]
fn category_columns_fan_out_with_grid_layout() {
    let fx = fixture();
    let json = run_json(
        fx.dir.path(),
        &[
            "view",
            "--board-file",
            path_str(&fx.board),
            "--mode",
            "columns",
            "--group",
            "category",
            "--now",
            NOW,
        ],
    );
    assert_eq!(json["layout"], "grid");
    let columns = json["columns"].as_array().expect("columns");
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0]["title"], "Docs");
    assert_eq!(ids(&columns[0]["tasks"]), vec![1, 3]);
    assert_eq!(ids(&columns[1]["tasks"]), vec![2, 3]);
    assert_eq!(columns[2]["title"], "Uncategorized");
    assert_eq!(ids(&columns[2]["tasks"]), vec![4, 5]);
}

#[test]
fn project_config_supplies_view_defaults() {
    let fx = fixture();
    let config_dir = fx.dir.path().join(".taskboard");
    std::fs::create_dir_all(&config_dir).expect("config dir");
    std::fs::write(
        config_dir.join("config.toml"),
        "[view]\nmode = \"columns\"\ngrouping = \"category\"\n",
    )
    .expect("write config");

    let json = run_json(
        fx.dir.path(),
        &["view", "--board-file", path_str(&fx.board), "--now", NOW],
    );
    assert_eq!(json["mode"], "columns");
    assert_eq!(json["grouping"], "category");
}

#[test]
fn text_view_prints_tab_separated_rows() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args(["view", "--board-file", path_str(&fx.board), "--now", NOW])
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "1\tlow\tTo Do\t2026-01-10\ttrue\tWrite docs\n",
        ));
}

#[test]
fn invalid_mode_reports_error_code() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args(["view", "--board-file", path_str(&fx.board), "--mode", "kanban", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2005"));
}

#[test]
fn unparseable_now_reports_timestamp_error() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args(["view", "--board-file", path_str(&fx.board), "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid timestamp 'yesterday'"))
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn missing_board_file_fails_with_path() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args(["view", "--board-file", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn view_without_source_fails() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args(["view"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--board-file"));
}

// ---------------------------------------------------------------------------
// statuses
// ---------------------------------------------------------------------------

#[test]
fn statuses_are_listed_in_display_order() {
    let fx = fixture();
    let json = run_json(
        fx.dir.path(),
        &["statuses", "--file", path_str(&fx.statuses)],
    );
    let names: Vec<&str> = json
        .as_array()
        .expect("status array")
        .iter()
        .map(|s| s["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["To Do", "In Progress", "Completed", "Blocked"]);
}

#[test]
fn priorities_are_listed_most_urgent_first() {
    let fx = fixture();
    let path = fx.dir.path().join("priorities.json");
    std::fs::write(
        &path,
        r#"{"status": "ok", "task_priorities": [
            {"id": "low", "level": "Low", "color": "secondary"},
            {"id": "critical", "level": "Critical", "color": "destructive"}
        ]}"#,
    )
    .expect("write priorities");

    tb_cmd(fx.dir.path())
        .args(["priorities", "--file", path_str(&path), "--format", "text"])
        .assert()
        .success()
        .stdout("critical\tCritical\tdestructive\nlow\tLow\tsecondary\n");
}

// ---------------------------------------------------------------------------
// access / categories (dry run)
// ---------------------------------------------------------------------------

#[test]
fn access_dry_run_reports_delta_without_backend() {
    let fx = fixture();
    let json = run_json(
        fx.dir.path(),
        &[
            "access",
            "board",
            "-w",
            "1",
            "-b",
            "4",
            "--original",
            "ana,bo",
            "--selected",
            "bo,cy",
            "--dry-run",
            "--api",
            "http://127.0.0.1:9",
        ],
    );
    assert_eq!(json["to_add"], serde_json::json!(["cy"]));
    assert_eq!(json["to_remove"], serde_json::json!(["ana"]));
    assert_eq!(json["applied"], false);
    assert_eq!(json["target"]["kind"], "board");
}

#[test]
fn unchanged_access_makes_no_requests() {
    let fx = fixture();
    // Without --dry-run, an unchanged selection must not reach the (dead) backend.
    let json = run_json(
        fx.dir.path(),
        &[
            "access",
            "workspace",
            "-w",
            "1",
            "--original",
            "ana,bo",
            "--selected",
            "bo,ana",
            "--api",
            "http://127.0.0.1:9",
        ],
    );
    assert_eq!(json["to_add"], serde_json::json!([]));
    assert_eq!(json["to_remove"], serde_json::json!([]));
    assert_eq!(json["applied"], false);
}

#[test]
fn access_change_against_dead_backend_is_transport_error() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args([
            "access",
            "workspace",
            "-w",
            "1",
            "--original",
            "ana",
            "--selected",
            "bo",
            "--api",
            "http://127.0.0.1:9",
            "--json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E4002"));
}

#[test]
fn board_access_requires_board_id() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args([
            "access",
            "board",
            "-w",
            "1",
            "--original",
            "ana",
            "--selected",
            "bo",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--board <ID>"));
}

#[test]
fn workspace_access_requires_original_list() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args(["access", "workspace", "-w", "1", "--selected", "bo", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--original <NAMES>"));
}

#[test]
fn board_access_without_original_reads_members_from_backend() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args([
            "access",
            "board",
            "-w",
            "1",
            "-b",
            "4",
            "--selected",
            "bo",
            "--dry-run",
            "--api",
            "http://127.0.0.1:9",
            "--json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E4002"));
}

#[test]
fn categories_dry_run_with_explicit_old_set() {
    let fx = fixture();
    let json = run_json(
        fx.dir.path(),
        &[
            "categories",
            "3",
            "-w",
            "1",
            "-b",
            "4",
            "--old",
            "1,2",
            "--new",
            "2,5",
            "--dry-run",
        ],
    );
    assert_eq!(json["task_id"], 3);
    assert_eq!(json["to_add"], serde_json::json!([5]));
    assert_eq!(json["to_remove"], serde_json::json!([1]));
}

#[test]
fn completions_emit_script() {
    let fx = fixture();
    tb_cmd(fx.dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tb"));
}
