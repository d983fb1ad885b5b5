//! Integration tests for routine and habit operations via CLI.
//!
//! These tests verify:
//! - `pt routine add/list/done/delete` with due badges
//! - Frequency is floored to one day
//! - `pt habit add/list/log/delete` with streaks
//! - Logging a habit twice on one day is a no-op

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Routine Tests ===

#[test]
fn test_routine_add_and_list_badge() {
    let env = TestEnv::new();

    env.pt()
        .args(["routine", "add", "Laundry", "--kind", "chore", "--every", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added routine routine-"));

    // completed today with a 7 day interval: due in 7 days
    env.pt()
        .args(["routine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(chore) Laundry"))
        .stdout(predicate::str::contains("every 7d"))
        .stdout(predicate::str::contains("7 days left"));
}

#[test]
fn test_routine_daily_shows_due_tomorrow() {
    let env = TestEnv::new();
    env.pt().args(["routine", "add", "Stretch"]).assert().success();

    let value = env.pt_json(&["routine", "list"]);
    assert_eq!(value["routines"][0]["frequency_days"], 1);
    assert_eq!(value["routines"][0]["days_left"], 1);
    assert_eq!(value["routines"][0]["badge"], "due tomorrow");
}

#[test]
fn test_routine_frequency_floored_to_one() {
    let env = TestEnv::new();
    env.pt()
        .args(["routine", "add", "Water plants", "--every", "0"])
        .assert()
        .success();

    let value = env.pt_json(&["routine", "list"]);
    assert_eq!(value["routines"][0]["frequency_days"], 1);
}

#[test]
fn test_routine_done_restarts_interval() {
    let env = TestEnv::new();
    let id = env.add_and_get_id(&["routine", "add", "Deep clean", "--every", "14"]);

    env.pt()
        .args(["routine", "done", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed Deep clean"))
        .stdout(predicate::str::contains("14 days"));

    let value = env.pt_json(&["routine", "list"]);
    assert_eq!(value["routines"][0]["days_left"], 14);
}

#[test]
fn test_routine_delete() {
    let env = TestEnv::new();
    let id = env.add_and_get_id(&["routine", "add", "Short lived"]);

    env.pt().args(["routine", "delete", &id]).assert().success();
    env.pt()
        .args(["routine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No routines"));
}

#[test]
fn test_routine_add_rejects_blank_name() {
    let env = TestEnv::new();

    env.pt()
        .args(["routine", "add", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

// === Habit Tests ===

#[test]
fn test_habit_add_and_list() {
    let env = TestEnv::new();
    env.pt().args(["habit", "add", "Read"]).assert().success();

    let value = env.pt_json(&["habit", "list"]);
    assert_eq!(value["habits"][0]["name"], "Read");
    assert_eq!(value["habits"][0]["streak"], 0);
    assert_eq!(value["habits"][0]["log"].as_array().unwrap().len(), 0);
}

#[test]
fn test_habit_log_starts_streak() {
    let env = TestEnv::new();
    let id = env.add_and_get_id(&["habit", "add", "Read"]);

    env.pt()
        .args(["habit", "log", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Read, streak 1"));

    let value = env.pt_json(&["habit", "list"]);
    assert_eq!(value["habits"][0]["streak"], 1);
}

#[test]
fn test_habit_log_twice_same_day_is_noop() {
    let env = TestEnv::new();
    let id = env.add_and_get_id(&["habit", "add", "Read"]);

    env.pt().args(["habit", "log", &id]).assert().success();
    env.pt()
        .args(["habit", "log", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("already logged today"));

    let value = env.pt_json(&["habit", "list"]);
    assert_eq!(value["habits"][0]["log"].as_array().unwrap().len(), 1);
    assert_eq!(value["habits"][0]["streak"], 1);
}

#[test]
fn test_habit_log_unknown_id_fails() {
    let env = TestEnv::new();

    env.pt()
        .args(["habit", "log", "habit-nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("habit-nope"));
}

#[test]
fn test_habit_delete() {
    let env = TestEnv::new();
    let id = env.add_and_get_id(&["habit", "add", "Short lived"]);

    env.pt()
        .args(["habit", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted habit"));

    env.pt()
        .args(["habit", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No habits"));
}
