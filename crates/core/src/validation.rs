//! Structural checks over a plan's dependency graph and timeline.
//!
//! An edge runs from a dependent task to each of its prerequisites. Dangling
//! references and cycles make a plan unusable; timeline conflicts are only
//! reported.

use std::collections::{HashMap, HashSet};

use crate::domain::plan::TimelineConflict;
use crate::domain::task::Task;
use crate::error::PlanError;

/// Ensure every dependency references a known task and the graph is acyclic.
pub fn validate_dependencies(tasks: &[Task]) -> Result<(), PlanError> {
    let index = index_by_id(tasks);

    for task in tasks {
        if let Some(missing) = task
            .depends_on
            .iter()
            .find(|dep| !index.contains_key(dep.as_str()))
        {
            return Err(PlanError::InvalidDependency {
                task_id: task.id.clone(),
                missing_id: missing.clone(),
            });
        }
    }

    let mut visited: HashSet<&str> = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if visited.insert(task.id.as_str()) {
            if let Some(node) = find_cycle_from(task.id.as_str(), &index, &mut visited) {
                return Err(PlanError::CyclicDependency {
                    task_id: node.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Id lookup where the first task with a given id wins.
fn index_by_id(tasks: &[Task]) -> HashMap<&str, &Task> {
    let mut index = HashMap::with_capacity(tasks.len());
    for task in tasks {
        index.entry(task.id.as_str()).or_insert(task);
    }
    index
}

/// Depth-first walk from `root` (already marked visited). Returns the node
/// reached through a back-edge, which lies on the cycle.
fn find_cycle_from<'a>(
    root: &'a str,
    index: &HashMap<&'a str, &'a Task>,
    visited: &mut HashSet<&'a str>,
) -> Option<&'a str> {
    let mut in_progress: HashSet<&str> = HashSet::from([root]);
    // (node, position of the next dependency to explore)
    let mut stack: Vec<(&str, usize)> = vec![(root, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        let deps = index
            .get(node)
            .map(|task| task.depends_on.as_slice())
            .unwrap_or(&[]);

        match deps.get(cursor) {
            Some(dep) => {
                frame.1 += 1;
                let dep = dep.as_str();
                if in_progress.contains(dep) {
                    return Some(dep);
                }
                if visited.insert(dep) {
                    in_progress.insert(dep);
                    stack.push((dep, 0));
                }
            }
            None => {
                in_progress.remove(node);
                stack.pop();
            }
        }
    }

    None
}

/// Report tasks that start before a prerequisite's due date.
///
/// Tasks without both dates, and prerequisites without a due date, are not
/// checkable and are skipped.
pub fn detect_timeline_conflicts(tasks: &[Task]) -> Vec<TimelineConflict> {
    let index = index_by_id(tasks);
    let mut conflicts = Vec::new();

    for task in tasks {
        let (Some(start), Some(_)) = (task.start_date, task.due_date) else {
            continue;
        };

        for dep_id in &task.depends_on {
            let Some(dep_due) = index.get(dep_id.as_str()).and_then(|dep| dep.due_date) else {
                continue;
            };

            if start < dep_due {
                conflicts.push(TimelineConflict {
                    task_id: task.id.clone(),
                    description: format!(
                        "Task '{}' starts on {} but depends on '{}' which finishes on {}",
                        task.id, start, dep_id, dep_due
                    ),
                });
            }
        }
    }

    conflicts
}
