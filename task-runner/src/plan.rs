//! Dependency ordering.
//!
//! Tasks are resolved depth-first: each task's dependencies are placed
//! before it in declaration order, and a task appears at most once per
//! plan no matter how many tasks depend on it.

use crate::error::{TaskError, TaskResult};
use crate::task::TaskSet;
use std::collections::HashSet;

/// Execution order for running `target`.
pub fn resolve(tasks: &TaskSet, target: &str) -> TaskResult<Vec<String>> {
    resolve_many(tasks, &[target])
}

/// Execution order for running every task in `targets`, in the given order.
pub fn resolve_many<S: AsRef<str>>(tasks: &TaskSet, targets: &[S]) -> TaskResult<Vec<String>> {
    let mut planner = Planner {
        tasks,
        visiting: Vec::new(),
        done: HashSet::new(),
        order: Vec::new(),
    };

    for target in targets {
        planner.visit(target.as_ref())?;
    }

    Ok(planner.order)
}

struct Planner<'a> {
    tasks: &'a TaskSet,
    /// Current dependency chain, outermost first
    visiting: Vec<String>,
    done: HashSet<String>,
    order: Vec<String>,
}

impl Planner<'_> {
    fn visit(&mut self, name: &str) -> TaskResult<()> {
        if self.done.contains(name) {
            return Ok(());
        }

        if let Some(pos) = self.visiting.iter().position(|n| n == name) {
            let mut chain = self.visiting[pos..].to_vec();
            chain.push(name.to_string());
            return Err(TaskError::DependencyCycle { chain });
        }

        let task = self.tasks.get(name).ok_or_else(|| TaskError::UnknownTask {
            name: name.to_string(),
        })?;

        self.visiting.push(name.to_string());
        for dep in &task.deps {
            self.visit(dep)?;
        }
        self.visiting.pop();

        self.done.insert(name.to_string());
        self.order.push(name.to_string());
        Ok(())
    }
}
