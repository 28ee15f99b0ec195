//! Basic CLI E2E tests.
//!
//! Tests invoke the built `ttm` binary against a throwaway config file and
//! verify outputs.

mod common;

use common::{assert_contains, parse_json, Sandbox};
use serde_json::Value;
use std::time::Duration;

#[test]
fn test_config_path_points_at_flag() {
    let sandbox = Sandbox::new();
    let out = sandbox.run_cli_success(&["config", "path"]);
    assert_eq!(out.trim(), sandbox.config_path().display().to_string());
}

#[test]
fn test_config_list_creates_defaults() {
    let sandbox = Sandbox::new();
    let json: Value = parse_json(&sandbox.run_cli_success(&["config", "list"]));
    assert_eq!(json["task_period"], 1500);
    assert_eq!(json["short_break"], 300);
    assert_eq!(json["long_break"], 900);
    assert_eq!(json["periods_before_long"], 4);
    assert!(sandbox.config_path().exists());
}

#[test]
fn test_config_set_then_get() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run_cli_success(&["config", "set", "short_break", "120"]).trim(), "ok");
    assert_eq!(sandbox.run_cli_success(&["config", "get", "short_break"]).trim(), "120");
}

#[test]
fn test_config_rejects_bad_values() {
    let sandbox = Sandbox::new();
    let (_, stderr, _) = sandbox.run_cli_failure(&["config", "set", "task_period", "0"]);
    assert_contains(&stderr, "task_period");
    sandbox.run_cli_failure(&["config", "set", "volume", "3"]);
    sandbox.run_cli_failure(&["config", "get", "volume"]);
    assert_eq!(sandbox.run_cli_success(&["config", "get", "task_period"]).trim(), "1500");
}

#[test]
fn test_invalid_config_file_is_fatal() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.config_path(), "task_period = 60\n").unwrap();
    let (_, stderr, _) = sandbox.run_cli_failure(&["timer", "status"]);
    assert_contains(&stderr, "error:");
}

#[test]
fn test_stats_all_starts_at_zero() {
    let sandbox = Sandbox::new();
    let json: Value = parse_json(&sandbox.run_cli_success(&["stats", "all"]));
    for key in ["interrupts", "short_breaks", "long_breaks", "successful_periods"] {
        assert_eq!(json[key], 0, "{key}");
    }
}

#[test]
fn test_stats_history_limit() {
    let sandbox = Sandbox::new();
    sandbox.run_cli_success(&["config", "list"]);
    std::fs::write(
        sandbox.stats_path(),
        r#"{"interrupts": 1, "short_breaks": 1, "long_breaks": 0, "successful_periods": 1,
            "history": [["2024-03-01 09:00:00.000000", "successful_periods"],
                        ["2024-03-01 09:25:00.000000", "short_breaks"],
                        ["2024-03-01 09:40:00.000000", "interrupts"]]}"#,
    )
    .unwrap();

    let json: Value = parse_json(&sandbox.run_cli_success(&["stats", "history", "--limit", "2"]));
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0][1], "short_breaks");
    assert_eq!(entries[1][1], "interrupts");

    let today: Value = parse_json(&sandbox.run_cli_success(&["stats", "today"]));
    assert_eq!(today["interrupts"], 0);
}

#[test]
fn test_timer_status_reports_standby() {
    let sandbox = Sandbox::new();
    let json: Value = parse_json(&sandbox.run_cli_success(&["timer", "status"]));
    assert_eq!(json["snapshot"]["type"], "StateSnapshot");
    assert_eq!(json["snapshot"]["phase"], Value::Null);
    assert_eq!(json["snapshot"]["running"], false);
    assert_eq!(json["durations_secs"]["task_period"], 1500);
}

#[test]
fn test_timer_run_records_interrupt() {
    let sandbox = Sandbox::new();
    let (stdout, stderr, code) = sandbox.run_cli_with_input(&["timer", "run"], "t\ni\nq\n");
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_contains(&stdout, "Task (25:00)");
    assert_contains(&stdout, "Task interrupted.");

    let json: Value = parse_json(&sandbox.run_cli_success(&["stats", "all"]));
    assert_eq!(json["interrupts"], 1);
    assert_eq!(json["successful_periods"], 0);
}

#[test]
fn test_timer_run_ends_on_eof() {
    let sandbox = Sandbox::new();
    let (stdout, _, code) = sandbox.run_cli_with_input(&["timer", "run"], "bogus\n");
    assert_eq!(code, 0);
    assert_contains(&stdout, "unknown command: bogus");
    assert!(!sandbox.stats_path().exists());
}

#[test]
fn test_timer_run_unanswered_prompt_records_nothing() {
    let sandbox = Sandbox::new();
    sandbox.run_cli_success(&["config", "set", "task_period", "1"]);

    let (stdout, stderr, code) = sandbox.run_cli_with_timed_input(
        &["timer", "run"],
        &[(Duration::ZERO, "t\n"), (Duration::from_millis(2500), "")],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_contains(&stdout, "Task ended. Count it as completed?");
    assert_contains(&stdout, "Task left unanswered, nothing recorded.");
    assert!(!stdout.contains("Short Break ("));
    assert!(!sandbox.stats_path().exists());
}

#[test]
fn test_timer_run_quit_at_prompt_records_nothing() {
    let sandbox = Sandbox::new();
    sandbox.run_cli_success(&["config", "set", "task_period", "1"]);

    let (stdout, stderr, code) = sandbox.run_cli_with_timed_input(
        &["timer", "run"],
        &[(Duration::ZERO, "t\n"), (Duration::from_millis(2500), "q\ny\n")],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_contains(&stdout, "Task ended. Count it as completed?");
    assert!(!stdout.contains("Short Break ("));

    let json: Value = parse_json(&sandbox.run_cli_success(&["stats", "all"]));
    assert_eq!(json["interrupts"], 0);
    assert_eq!(json["successful_periods"], 0);
    let history: Value = parse_json(&sandbox.run_cli_success(&["stats", "history"]));
    assert_eq!(history, serde_json::json!([]));
    assert!(!sandbox.stats_path().exists());
}
