//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use taskgraph::core::models::{
    IdError, Priority, TaskRef, TaskStatus, format_task_id, ids_equal, parse_task_id,
};
use test_case::test_case;

// =============================================================================
// ID Parsing Tests
// =============================================================================

#[test_case("5", 5, None ; "bare task id")]
#[test_case("12.3", 12, Some(3) ; "subtask id")]
#[test_case(" 7 ", 7, None ; "surrounding whitespace")]
#[test_case("1.10", 1, Some(10) ; "multi digit subtask")]
fn test_parse_task_id(raw: &str, task_id: u32, subtask_id: Option<u32>) {
    let id = parse_task_id(raw).unwrap();
    assert_eq!(id, TaskRef { task_id, subtask_id });
}

#[test_case("abc" ; "letters")]
#[test_case("" ; "empty")]
#[test_case("0" ; "zero task")]
#[test_case("3.0" ; "zero subtask")]
#[test_case("1.2.3" ; "two dots")]
#[test_case("5." ; "trailing dot")]
#[test_case(".5" ; "leading dot")]
#[test_case("-1" ; "negative")]
#[test_case("+4" ; "plus sign")]
#[test_case("1.x" ; "non numeric subtask")]
fn test_parse_task_id_rejects(raw: &str) {
    let err = parse_task_id(raw).unwrap_err();
    assert_eq!(err, IdError::InvalidIdFormat(raw.to_string()));
}

#[test_case(12, Some(3), "12.3" ; "with subtask")]
#[test_case(5, None, "5" ; "without subtask")]
fn test_format_task_id(task_id: u32, subtask_id: Option<u32>, expected: &str) {
    assert_eq!(format_task_id(task_id, subtask_id), expected);
}

#[test]
fn test_ids_equal_across_representations() {
    assert!(ids_equal("5", 5_u32));
    assert!(ids_equal("5.2", TaskRef::subtask(5, 2)));
    assert!(ids_equal(" 3 ", "3"));
    assert!(!ids_equal("5", "5.1"));
    assert!(!ids_equal("abc", "abc"));
}

// =============================================================================
// Status Tests
// =============================================================================

#[test_case("pending", TaskStatus::Pending ; "pending")]
#[test_case("todo", TaskStatus::Pending ; "todo alias")]
#[test_case("in-progress", TaskStatus::InProgress ; "in progress")]
#[test_case("in_progress", TaskStatus::InProgress ; "underscore alias")]
#[test_case("Started", TaskStatus::InProgress ; "started alias mixed case")]
#[test_case("done", TaskStatus::Done ; "done")]
#[test_case("completed", TaskStatus::Done ; "completed alias")]
#[test_case("review", TaskStatus::Review ; "review")]
#[test_case("deferred", TaskStatus::Deferred ; "deferred")]
#[test_case("canceled", TaskStatus::Cancelled ; "american spelling")]
fn test_status_from_str(input: &str, expected: TaskStatus) {
    assert_eq!(input.parse::<TaskStatus>().unwrap(), expected);
}

#[test]
fn test_status_from_str_invalid() {
    let err = "blocked".parse::<TaskStatus>().unwrap_err();
    assert!(err.contains("Invalid status"));
}

#[test_case(TaskStatus::Done, true, true ; "done")]
#[test_case(TaskStatus::Cancelled, false, true ; "cancelled")]
#[test_case(TaskStatus::Pending, false, false ; "pending")]
#[test_case(TaskStatus::Review, false, false ; "review")]
fn test_status_completion(status: TaskStatus, complete: bool, terminal: bool) {
    assert_eq!(status.is_complete(), complete);
    assert_eq!(status.is_terminal(), terminal);
}

// =============================================================================
// Priority Tests
// =============================================================================

#[test_case("high", Priority::High ; "high")]
#[test_case("H", Priority::High ; "short upper")]
#[test_case("med", Priority::Medium ; "med alias")]
#[test_case("low", Priority::Low ; "low")]
fn test_priority_from_str(input: &str, expected: Priority) {
    assert_eq!(input.parse::<Priority>().unwrap(), expected);
}

#[test]
fn test_priority_weights_are_monotone() {
    assert!(Priority::Low.weight() < Priority::Medium.weight());
    assert!(Priority::Medium.weight() < Priority::High.weight());
    assert!((Priority::High.weight() - 1.0).abs() < f64::EPSILON);
}
