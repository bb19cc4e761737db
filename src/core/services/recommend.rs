//! Recommendation service - picks the next task to work on
//!
//! Eligible tasks (pending, optionally in-progress) are split into blocked
//! and unblocked. Unblocked candidates get a composite score, the weighted
//! sum of independent factors in `[0, 1]`:
//!
//! - priority: high 1.0, medium 0.5, low 0.0
//! - dependency: `1 / (1 + depth)`, where depth is the longest dependency
//!   chain below the task, so tasks with no dependencies score 1.0
//! - complexity: `(10 - score) / 9`, 0.5 when no score is attached
//! - due date: linear over candidate due dates, earliest 1.0, latest 0.0,
//!   0.0 without a due date
//!
//! Weights are not renormalised. Candidates are ranked by descending score,
//! ties broken by ascending task id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::models::{Priority, Task, TaskCollection, TaskId, TaskStatus};
use crate::core::services::graph::DependencyGraph;

/// Number of alternatives returned unless configured otherwise
pub const DEFAULT_MAX_ALTERNATIVES: usize = 5;

/// Complexity scores below or at this value are called out as quick wins
const QUICK_WIN_COMPLEXITY: f64 = 3.0;

/// Per-factor weights for the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of the priority factor
    pub priority: f64,
    /// Weight of the dependency-depth factor
    pub dependency: f64,
    /// Weight of the complexity factor
    pub complexity: f64,
    /// Weight of the due-date factor
    pub due_date: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            priority: 0.7,
            dependency: 0.3,
            complexity: 0.0,
            due_date: 0.0,
        }
    }
}

/// Caller-supplied options for [`recommend_next_task`]
#[derive(Debug, Clone, PartialEq)]
pub struct NextTaskCriteria {
    /// Also consider tasks already in progress
    pub include_in_progress: bool,
    /// Task ids to leave out entirely
    pub exclude: Vec<TaskId>,
    /// Factor weights
    pub weights: ScoringWeights,
    /// How many runners-up to return
    pub max_alternatives: usize,
}

impl Default for NextTaskCriteria {
    fn default() -> Self {
        Self {
            include_in_progress: false,
            exclude: Vec::new(),
            weights: ScoringWeights::default(),
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }
}

/// Individual factor scores, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorScores {
    /// Priority factor
    pub priority: f64,
    /// Dependency-depth factor
    pub dependency: f64,
    /// Complexity factor
    pub complexity: f64,
    /// Due-date factor
    pub due_date: f64,
}

impl FactorScores {
    /// Weighted sum of the factors
    #[must_use]
    pub fn weighted(&self, weights: &ScoringWeights) -> f64 {
        weights.priority * self.priority
            + weights.dependency * self.dependency
            + weights.complexity * self.complexity
            + weights.due_date * self.due_date
    }
}

/// An unblocked candidate with its score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTask {
    /// The candidate task
    pub task_id: TaskId,
    /// Its title
    pub title: String,
    /// Its status
    pub status: TaskStatus,
    /// Its priority
    pub priority: Priority,
    /// Composite score
    pub score: f64,
    /// Breakdown of the score
    pub factors: FactorScores,
    /// Short human-readable explanations
    pub reasons: Vec<String>,
}

/// An eligible task that cannot start yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedTask {
    /// The blocked task
    pub task_id: TaskId,
    /// Its title
    pub title: String,
    /// Dependencies that are not yet done
    pub blocked_by: Vec<TaskId>,
    /// Human-readable explanation
    pub reason: String,
}

/// Result of [`recommend_next_task`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTaskResult {
    /// The highest scoring unblocked task, if any
    pub recommendation: Option<ScoredTask>,
    /// Runners-up in rank order
    pub alternatives: Vec<ScoredTask>,
    /// Eligible tasks waiting on unfinished dependencies
    pub blocked_tasks: Vec<BlockedTask>,
}

fn is_eligible(status: TaskStatus, criteria: &NextTaskCriteria) -> bool {
    match status {
        TaskStatus::Pending => true,
        TaskStatus::InProgress => criteria.include_in_progress,
        _ => false,
    }
}

#[allow(clippy::cast_precision_loss)]
fn dependency_factor(depth: usize) -> f64 {
    1.0 / (1.0 + depth as f64)
}

fn complexity_factor(score: Option<f64>) -> f64 {
    score.map_or(0.5, |s| ((10.0 - s) / 9.0).clamp(0.0, 1.0))
}

#[allow(clippy::cast_precision_loss)]
fn due_date_factor(due: Option<NaiveDate>, range: Option<(NaiveDate, NaiveDate)>) -> f64 {
    match (due, range) {
        (Some(due), Some((earliest, latest))) => {
            let span = (latest - earliest).num_days();
            if span == 0 {
                return 1.0;
            }
            let offset = (due - earliest).num_days();
            (1.0 - offset as f64 / span as f64).clamp(0.0, 1.0)
        },
        _ => 0.0,
    }
}

fn blocked_reason(unmet: &[TaskId]) -> String {
    let ids = unmet.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    if unmet.len() == 1 {
        format!("waiting on unfinished dependency {ids}")
    } else {
        format!("waiting on unfinished dependencies {ids}")
    }
}

fn reasons(
    task: &Task,
    factors: &FactorScores,
    dependents: usize,
    weights: &ScoringWeights,
) -> Vec<String> {
    let mut reasons = vec!["no unmet dependencies".to_string()];
    if dependents > 0 {
        reasons.push(format!("unblocks {dependents} task(s)"));
    }
    reasons.push(format!("{} priority", task.priority));
    if task.status == TaskStatus::InProgress {
        reasons.push("already in progress".to_string());
    }
    if weights.complexity > 0.0
        && let Some(score) = task.complexity_score
    {
        if score <= QUICK_WIN_COMPLEXITY {
            reasons.push(format!("quick win (complexity {score})"));
        } else {
            reasons.push(format!("complexity {score}"));
        }
    }
    if weights.due_date > 0.0
        && let Some(due) = task.due_date
    {
        reasons.push(format!("due {due}"));
        if factors.due_date >= 1.0 {
            reasons.push("earliest due date".to_string());
        }
    }
    reasons
}

/// Recommend the next task to work on
///
/// Never mutates `tasks`. Expects an acyclic graph (see
/// [`crate::core::services::graph::fix`]); cycles are tolerated but make
/// the dependency factor less meaningful.
#[must_use]
pub fn recommend_next_task(tasks: &TaskCollection, criteria: &NextTaskCriteria) -> NextTaskResult {
    let graph = DependencyGraph::build(tasks);
    let depths = graph.depths();
    let dependents = graph.dependent_counts();

    let mut blocked_tasks = Vec::new();
    let mut candidates: Vec<&Task> = Vec::new();

    for task in tasks {
        if !is_eligible(task.status, criteria) || criteria.exclude.contains(&task.id) {
            continue;
        }

        let unmet = task.unmet_dependencies(tasks.tasks());

        if unmet.is_empty() {
            candidates.push(task);
        } else {
            blocked_tasks.push(BlockedTask {
                task_id: task.id,
                title: task.title.clone(),
                reason: blocked_reason(&unmet),
                blocked_by: unmet,
            });
        }
    }

    let due_range = candidates.iter().filter_map(|t| t.due_date).fold(None, |range, due| {
        Some(match range {
            None => (due, due),
            Some((lo, hi)) => (std::cmp::min(lo, due), std::cmp::max(hi, due)),
        })
    });

    let weights = &criteria.weights;
    let mut ranked: Vec<ScoredTask> = candidates
        .into_iter()
        .map(|task| {
            let factors = FactorScores {
                priority: task.priority.weight(),
                dependency: dependency_factor(depths.get(&task.id).copied().unwrap_or(0)),
                complexity: complexity_factor(task.complexity_score),
                due_date: due_date_factor(task.due_date, due_range),
            };
            let downstream = dependents.get(&task.id).copied().unwrap_or(0);
            ScoredTask {
                task_id: task.id,
                title: task.title.clone(),
                status: task.status,
                priority: task.priority,
                score: factors.weighted(weights),
                reasons: reasons(task, &factors, downstream, weights),
                factors,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.task_id.cmp(&b.task_id)));

    log::debug!(
        "{} candidate(s), {} blocked, recommending {:?}",
        ranked.len(),
        blocked_tasks.len(),
        ranked.first().map(|t| t.task_id)
    );

    let mut ranked = ranked.into_iter();
    let recommendation = ranked.next();
    let alternatives = ranked.take(criteria.max_alternatives).collect();

    NextTaskResult {
        recommendation,
        alternatives,
        blocked_tasks,
    }
}
