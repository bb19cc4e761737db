//! Dependency graph service - validation and repair
//!
//! The graph is re-derived from the collection on every call; nothing is
//! cached between calls, so each operation is independent and idempotent
//! for a given input.
//!
//! Edges point from a task to the tasks it depends on. Cycle detection is
//! a depth-first traversal in the collection's natural order with an
//! explicit stack. An edge into a node that is still on the stack is a
//! back-edge; it closes a cycle and is the edge [`fix`] removes. This
//! guarantees an acyclic result but not a minimal set of removed edges.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::core::models::{TaskCollection, TaskId, TaskRef};

/// A dependency on a task id that does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingReference {
    /// The task holding the dangling dependency
    pub task_id: TaskId,
    /// The id that has no matching task
    pub dependency_id: TaskId,
}

/// A subtask dependency whose target does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissingSubtaskReference {
    /// The subtask holding the dangling reference
    pub subtask: TaskRef,
    /// The reference that does not resolve
    pub dependency: TaskRef,
}

/// Result of [`validate`]
///
/// An empty report means the graph is consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Task dependencies pointing at ids with no task
    pub missing_references: Vec<MissingReference>,
    /// Tasks listing themselves as a dependency
    pub self_references: Vec<TaskId>,
    /// Closed loops of task ids, in traversal order
    pub cycles: Vec<Vec<TaskId>>,
    /// Subtask dependencies pointing at a missing task or subtask
    pub missing_subtask_references: Vec<MissingSubtaskReference>,
    /// Subtasks listing themselves as a dependency
    pub subtask_self_references: Vec<TaskRef>,
}

impl ValidationReport {
    /// Whether no problems were found
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issue_count() == 0
    }

    /// Total number of problems found
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.missing_references.len()
            + self.self_references.len()
            + self.cycles.len()
            + self.missing_subtask_references.len()
            + self.subtask_self_references.len()
    }
}

/// An edge that closes a cycle, found during depth-first traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BackEdge {
    /// The task whose dependency closes the loop
    pub from: TaskId,
    /// The ancestor it points back to
    pub to: TaskId,
}

/// Why [`fix`] removed an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalReason {
    /// The item depended on itself
    SelfReference,
    /// The target does not exist
    MissingTarget,
    /// The edge was listed more than once
    Duplicate,
    /// The edge closed a cycle
    Cycle,
}

impl std::fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfReference => write!(f, "self-reference"),
            Self::MissingTarget => write!(f, "missing-target"),
            Self::Duplicate => write!(f, "duplicate"),
            Self::Cycle => write!(f, "cycle"),
        }
    }
}

/// A dependency entry removed by [`fix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemovedEdge {
    /// The task or subtask that held the dependency
    pub from: TaskRef,
    /// The dependency that was removed
    pub to: TaskRef,
    /// Why it was removed
    pub reason: RemovalReason,
}

/// Result of [`fix`]
#[derive(Debug, Clone, PartialEq)]
pub struct FixOutcome {
    /// The repaired collection; persist this, not the input
    pub tasks: TaskCollection,
    /// Every removed dependency entry, in removal order
    pub removed_edges: Vec<RemovedEdge>,
}

impl FixOutcome {
    /// Whether the input was already consistent
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed_edges.is_empty()
    }
}

/// A cycle found during traversal together with the edge that closed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DetectedCycle {
    pub edge: BackEdge,
    pub path: Vec<TaskId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    OnStack,
    Done,
}

struct Frame {
    node: TaskId,
    next: usize,
}

/// Task-level adjacency derived from a collection
///
/// Only edges between two distinct existing tasks are kept, once each, in
/// the order they are listed.
#[derive(Debug, Clone)]
pub(crate) struct DependencyGraph {
    order: Vec<TaskId>,
    edges: HashMap<TaskId, Vec<TaskId>>,
}

impl DependencyGraph {
    pub(crate) fn build(tasks: &TaskCollection) -> Self {
        let known: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
        let mut edges = HashMap::with_capacity(tasks.len());
        for task in tasks {
            let mut seen = HashSet::new();
            let deps: Vec<TaskId> = task
                .dependencies
                .iter()
                .copied()
                .filter(|dep| *dep != task.id && known.contains(dep) && seen.insert(*dep))
                .collect();
            edges.insert(task.id, deps);
        }
        Self {
            order: tasks.iter().map(|t| t.id).collect(),
            edges,
        }
    }

    pub(crate) fn dependencies_of(&self, id: TaskId) -> &[TaskId] {
        self.edges.get(&id).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Depth-first traversal recording every back-edge and the cycle it closes
    pub(crate) fn cycles(&self) -> Vec<DetectedCycle> {
        let mut state: HashMap<TaskId, Visit> = HashMap::with_capacity(self.order.len());
        let mut found = Vec::new();

        for &start in &self.order {
            if state.contains_key(&start) {
                continue;
            }
            state.insert(start, Visit::OnStack);
            let mut stack = vec![Frame {
                node: start,
                next: 0,
            }];

            while let Some(frame) = stack.last_mut() {
                let node = frame.node;
                let Some(&dep) = self.dependencies_of(node).get(frame.next) else {
                    state.insert(node, Visit::Done);
                    stack.pop();
                    continue;
                };
                frame.next += 1;

                match state.get(&dep) {
                    None => {
                        state.insert(dep, Visit::OnStack);
                        stack.push(Frame { node: dep, next: 0 });
                    },
                    Some(Visit::OnStack) => {
                        let begin = stack.iter().position(|f| f.node == dep).unwrap_or(0);
                        found.push(DetectedCycle {
                            edge: BackEdge {
                                from: node,
                                to: dep,
                            },
                            path: stack[begin..].iter().map(|f| f.node).collect(),
                        });
                    },
                    Some(Visit::Done) => {},
                }
            }
        }

        found
    }

    /// Length of the longest dependency chain below each task
    ///
    /// Edges that would close a cycle are ignored.
    pub(crate) fn depths(&self) -> HashMap<TaskId, usize> {
        let mut depth: HashMap<TaskId, usize> = HashMap::with_capacity(self.order.len());
        let mut visited: HashSet<TaskId> = HashSet::with_capacity(self.order.len());

        for &start in &self.order {
            if !visited.insert(start) {
                continue;
            }
            let mut stack = vec![Frame {
                node: start,
                next: 0,
            }];

            while let Some(frame) = stack.last_mut() {
                let node = frame.node;
                if let Some(&dep) = self.dependencies_of(node).get(frame.next) {
                    frame.next += 1;
                    if visited.insert(dep) {
                        stack.push(Frame { node: dep, next: 0 });
                    }
                    continue;
                }
                let d = self
                    .dependencies_of(node)
                    .iter()
                    .filter_map(|dep| depth.get(dep))
                    .map(|d| d + 1)
                    .max()
                    .unwrap_or(0);
                depth.insert(node, d);
                stack.pop();
            }
        }

        depth
    }

    /// Number of tasks directly depending on each task
    pub(crate) fn dependent_counts(&self) -> HashMap<TaskId, usize> {
        let mut counts = HashMap::new();
        for deps in self.edges.values() {
            for dep in deps {
                *counts.entry(*dep).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Whether `to` is reachable from `from` by following dependencies
    pub(crate) fn reaches(&self, from: TaskId, to: TaskId) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![from];
        while let Some(node) = pending.pop() {
            if node == to {
                return true;
            }
            if seen.insert(node) {
                pending.extend_from_slice(self.dependencies_of(node));
            }
        }
        false
    }
}

/// Report missing references, self-references, and cycles without mutating
#[must_use]
pub fn validate(tasks: &TaskCollection) -> ValidationReport {
    let mut report = ValidationReport::default();

    for task in tasks {
        let mut reported = HashSet::new();
        for &dep in &task.dependencies {
            if dep == task.id {
                if !report.self_references.contains(&task.id) {
                    report.self_references.push(task.id);
                }
            } else if tasks.get(dep).is_none() && reported.insert(dep) {
                report.missing_references.push(MissingReference {
                    task_id: task.id,
                    dependency_id: dep,
                });
            }
        }

        for sub in &task.subtasks {
            let own = TaskRef::subtask(task.id, sub.id);
            let mut reported = HashSet::new();
            for dep in &sub.dependencies {
                if *dep == own {
                    if !report.subtask_self_references.contains(&own) {
                        report.subtask_self_references.push(own);
                    }
                } else if !tasks.contains(dep) && reported.insert(*dep) {
                    report.missing_subtask_references.push(MissingSubtaskReference {
                        subtask: own,
                        dependency: *dep,
                    });
                }
            }
        }
    }

    let graph = DependencyGraph::build(tasks);
    log::debug!("validating {} task(s) with {} edge(s)", tasks.len(), graph.edge_count());
    report.cycles = graph.cycles().into_iter().map(|c| c.path).collect();

    report
}

/// The back-edges a depth-first traversal discovers, one per detected cycle
#[must_use]
pub fn find_cycles(tasks: &TaskCollection) -> Vec<BackEdge> {
    DependencyGraph::build(tasks)
        .cycles()
        .into_iter()
        .map(|c| c.edge)
        .collect()
}

/// Repair the graph, returning a new collection and a log of removed edges
///
/// Applied in order: self-references, references to missing items,
/// duplicate entries, then one back-edge per detected cycle, repeated until
/// traversal finds no cycle. The input is left untouched.
#[must_use]
pub fn fix(tasks: &TaskCollection) -> FixOutcome {
    let mut repaired = tasks.clone();
    let mut removed = Vec::new();

    strip_self_references(&mut repaired, &mut removed);
    strip_missing_targets(&mut repaired, &mut removed);
    strip_duplicates(&mut repaired, &mut removed);
    break_cycles(&mut repaired, &mut removed);

    for edge in &removed {
        log::debug!("removed {} dependency {} -> {}", edge.reason, edge.from, edge.to);
    }
    if !removed.is_empty() {
        log::info!("fixed dependency graph: removed {} edge(s)", removed.len());
    }

    FixOutcome {
        tasks: repaired,
        removed_edges: removed,
    }
}

fn strip_self_references(tasks: &mut TaskCollection, removed: &mut Vec<RemovedEdge>) {
    for task in tasks.tasks_mut() {
        let id = task.id;
        task.dependencies.retain(|&dep| {
            let keep = dep != id;
            if !keep {
                removed.push(RemovedEdge {
                    from: TaskRef::task(id),
                    to: TaskRef::task(dep),
                    reason: RemovalReason::SelfReference,
                });
            }
            keep
        });

        for sub in &mut task.subtasks {
            let own = TaskRef::subtask(id, sub.id);
            sub.dependencies.retain(|dep| {
                let keep = *dep != own;
                if !keep {
                    removed.push(RemovedEdge {
                        from: own,
                        to: *dep,
                        reason: RemovalReason::SelfReference,
                    });
                }
                keep
            });
        }
    }
}

fn strip_missing_targets(tasks: &mut TaskCollection, removed: &mut Vec<RemovedEdge>) {
    let known: HashSet<TaskRef> = tasks
        .iter()
        .flat_map(|t| {
            std::iter::once(t.task_ref())
                .chain(t.subtasks.iter().map(|s| TaskRef::subtask(t.id, s.id)))
        })
        .collect();

    for task in tasks.tasks_mut() {
        let id = task.id;
        task.dependencies.retain(|&dep| {
            let keep = known.contains(&TaskRef::task(dep));
            if !keep {
                removed.push(RemovedEdge {
                    from: TaskRef::task(id),
                    to: TaskRef::task(dep),
                    reason: RemovalReason::MissingTarget,
                });
            }
            keep
        });

        for sub in &mut task.subtasks {
            let own = TaskRef::subtask(id, sub.id);
            sub.dependencies.retain(|dep| {
                let keep = known.contains(dep);
                if !keep {
                    removed.push(RemovedEdge {
                        from: own,
                        to: *dep,
                        reason: RemovalReason::MissingTarget,
                    });
                }
                keep
            });
        }
    }
}

fn strip_duplicates(tasks: &mut TaskCollection, removed: &mut Vec<RemovedEdge>) {
    for task in tasks.tasks_mut() {
        let id = task.id;
        let mut seen = HashSet::new();
        task.dependencies.retain(|&dep| {
            let keep = seen.insert(dep);
            if !keep {
                removed.push(RemovedEdge {
                    from: TaskRef::task(id),
                    to: TaskRef::task(dep),
                    reason: RemovalReason::Duplicate,
                });
            }
            keep
        });

        for sub in &mut task.subtasks {
            let own = TaskRef::subtask(id, sub.id);
            let mut seen = HashSet::new();
            sub.dependencies.retain(|dep| {
                let keep = seen.insert(*dep);
                if !keep {
                    removed.push(RemovedEdge {
                        from: own,
                        to: *dep,
                        reason: RemovalReason::Duplicate,
                    });
                }
                keep
            });
        }
    }
}

fn break_cycles(tasks: &mut TaskCollection, removed: &mut Vec<RemovedEdge>) {
    // Every pass removes at least one edge, so this is bounded by the edge count
    loop {
        let back_edges = find_cycles(tasks);
        if back_edges.is_empty() {
            break;
        }
        for edge in back_edges {
            let Some(task) = tasks.get_mut(edge.from) else {
                continue;
            };
            if let Some(pos) = task.dependencies.iter().position(|d| *d == edge.to) {
                task.dependencies.remove(pos);
                removed.push(RemovedEdge {
                    from: TaskRef::task(edge.from),
                    to: TaskRef::task(edge.to),
                    reason: RemovalReason::Cycle,
                });
            }
        }
    }
}
