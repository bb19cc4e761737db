//! Tests for next-task recommendation

use taskgraph::core::models::{Priority, TaskStatus};
use taskgraph::core::services::{NextTaskCriteria, ScoringWeights, recommend_next_task};

use super::common::fixtures::chain;
use super::common::{TaskBuilder, collection};

fn weights(priority: f64, dependency: f64, complexity: f64, due_date: f64) -> NextTaskCriteria {
    NextTaskCriteria {
        weights: ScoringWeights {
            priority,
            dependency,
            complexity,
            due_date,
        },
        ..NextTaskCriteria::default()
    }
}

// =============================================================================
// BLOCKING TESTS
// =============================================================================

#[test]
fn test_chain_recommends_first_and_blocks_rest() {
    let result = recommend_next_task(&chain(3), &NextTaskCriteria::default());

    let top = result.recommendation.expect("task 1 is ready");
    assert_eq!(top.task_id, 1);
    assert!(top.reasons.contains(&"no unmet dependencies".to_string()));

    let blocked: Vec<_> = result.blocked_tasks.iter().map(|b| (b.task_id, b.blocked_by.clone())).collect();
    assert_eq!(blocked, vec![(2, vec![1]), (3, vec![2])]);
    assert!(result.blocked_tasks[0].reason.contains('1'));
    assert!(result.blocked_tasks[1].reason.contains('2'));
}

#[test]
fn test_all_done_returns_nothing() {
    let tasks = collection(vec![
        TaskBuilder::new(1).status(TaskStatus::Done).build(),
        TaskBuilder::new(2).deps(&[1]).status(TaskStatus::Done).build(),
    ]);

    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert!(result.recommendation.is_none());
    assert!(result.alternatives.is_empty());
    assert!(result.blocked_tasks.is_empty());
}

#[test]
fn test_done_dependency_unblocks() {
    let tasks = collection(vec![
        TaskBuilder::new(1).status(TaskStatus::Done).build(),
        TaskBuilder::new(2).deps(&[1]).build(),
    ]);

    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert_eq!(result.recommendation.unwrap().task_id, 2);
}

#[test]
fn test_cancelled_dependency_still_blocks() {
    let tasks = collection(vec![
        TaskBuilder::new(1).status(TaskStatus::Cancelled).build(),
        TaskBuilder::new(2).deps(&[1]).build(),
    ]);

    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert!(result.recommendation.is_none());
    assert_eq!(result.blocked_tasks[0].blocked_by, vec![1]);
}

#[test]
fn test_missing_dependency_does_not_block() {
    let tasks = collection(vec![TaskBuilder::new(7).deps(&[99]).build()]);
    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert_eq!(result.recommendation.unwrap().task_id, 7);
}

#[test]
fn test_subtasks_do_not_gate_parent() {
    let tasks = collection(vec![TaskBuilder::new(1).subtask(1, &[]).subtask(2, &[]).build()]);
    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert_eq!(result.recommendation.unwrap().task_id, 1);
}

// =============================================================================
// ELIGIBILITY TESTS
// =============================================================================

#[test]
fn test_in_progress_needs_opt_in() {
    let tasks = collection(vec![TaskBuilder::new(1).status(TaskStatus::InProgress).build()]);

    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert!(result.recommendation.is_none());

    let criteria = NextTaskCriteria {
        include_in_progress: true,
        ..NextTaskCriteria::default()
    };
    let top = recommend_next_task(&tasks, &criteria).recommendation.unwrap();
    assert_eq!(top.task_id, 1);
    assert!(top.reasons.contains(&"already in progress".to_string()));
}

#[test]
fn test_excluded_tasks_are_skipped() {
    let tasks = collection(vec![TaskBuilder::new(1).build(), TaskBuilder::new(2).build()]);
    let criteria = NextTaskCriteria {
        exclude: vec![1],
        ..NextTaskCriteria::default()
    };

    let result = recommend_next_task(&tasks, &criteria);
    assert_eq!(result.recommendation.unwrap().task_id, 2);
    assert!(result.alternatives.is_empty());
}

#[test]
fn test_review_and_deferred_are_not_eligible() {
    let tasks = collection(vec![
        TaskBuilder::new(1).status(TaskStatus::Review).build(),
        TaskBuilder::new(2).status(TaskStatus::Deferred).build(),
    ]);
    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert!(result.recommendation.is_none());
    assert!(result.blocked_tasks.is_empty());
}

// =============================================================================
// RANKING TESTS
// =============================================================================

#[test]
fn test_priority_outranks() {
    let tasks = collection(vec![
        TaskBuilder::new(1).priority(Priority::Low).build(),
        TaskBuilder::new(2).priority(Priority::High).build(),
        TaskBuilder::new(3).build(),
    ]);

    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    let order: Vec<u32> = std::iter::once(result.recommendation.unwrap().task_id)
        .chain(result.alternatives.iter().map(|a| a.task_id))
        .collect();
    assert_eq!(order, vec![2, 3, 1]);
}

#[test]
fn test_ties_break_by_ascending_id() {
    let tasks = collection(vec![
        TaskBuilder::new(9).build(),
        TaskBuilder::new(3).build(),
        TaskBuilder::new(5).build(),
    ]);

    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert_eq!(result.recommendation.unwrap().task_id, 3);
    let alts: Vec<u32> = result.alternatives.iter().map(|a| a.task_id).collect();
    assert_eq!(alts, vec![5, 9]);
}

#[test]
fn test_alternatives_are_capped() {
    let tasks = collection((1..=10).map(|id| TaskBuilder::new(id).build()).collect());

    let result = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert_eq!(result.alternatives.len(), 5);

    let criteria = NextTaskCriteria {
        max_alternatives: 2,
        ..NextTaskCriteria::default()
    };
    assert_eq!(recommend_next_task(&tasks, &criteria).alternatives.len(), 2);
}

#[test]
fn test_default_score_is_weighted_sum() {
    let tasks = collection(vec![TaskBuilder::new(1).priority(Priority::High).build()]);
    let top = recommend_next_task(&tasks, &NextTaskCriteria::default()).recommendation.unwrap();

    assert!((top.factors.priority - 1.0).abs() < 1e-9);
    assert!((top.factors.dependency - 1.0).abs() < 1e-9);
    assert!((top.score - 1.0).abs() < 1e-9);
}

#[test]
fn test_weights_are_not_renormalised() {
    let tasks = collection(vec![TaskBuilder::new(1).priority(Priority::High).build()]);
    let top = recommend_next_task(&tasks, &weights(2.0, 1.0, 0.0, 0.0)).recommendation.unwrap();
    assert!((top.score - 3.0).abs() < 1e-9);
}

#[test]
fn test_complexity_prefers_quick_wins() {
    let tasks = collection(vec![
        TaskBuilder::new(1).complexity(9.0).build(),
        TaskBuilder::new(2).complexity(2.0).build(),
    ]);

    let top = recommend_next_task(&tasks, &weights(0.0, 0.0, 1.0, 0.0)).recommendation.unwrap();
    assert_eq!(top.task_id, 2);
    assert!(top.reasons.iter().any(|r| r.starts_with("quick win")));
}

#[test]
fn test_earlier_due_date_wins() {
    let tasks = collection(vec![
        TaskBuilder::new(1).due("2026-03-01").build(),
        TaskBuilder::new(2).due("2026-01-15").build(),
        TaskBuilder::new(3).build(),
    ]);

    let result = recommend_next_task(&tasks, &weights(0.0, 0.0, 0.0, 1.0));
    let top = result.recommendation.unwrap();
    assert_eq!(top.task_id, 2);
    assert!(top.reasons.contains(&"earliest due date".to_string()));
    assert_eq!(result.alternatives.last().unwrap().task_id, 3);
}

#[test]
fn test_recommendation_never_mutates() {
    let tasks = chain(4);
    let before = tasks.clone();
    let _ = recommend_next_task(&tasks, &NextTaskCriteria::default());
    assert_eq!(tasks, before);
}
