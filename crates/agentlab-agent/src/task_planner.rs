//! Task Planner: an ordered list of opaque tasks.
//!
//! The planner never parses task content. "Optimizing" is a stable sort by
//! the tasks' natural ordering, and refuses to sort values that have none.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// An opaque task value: free text or a number.
///
/// Text orders lexically against text, numbers numerically against numbers.
/// Text and numbers are not comparable with each other, and NaN is not
/// comparable with anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Task {
    Number(f64),
    Text(String),
}

impl Task {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Task::Text(s) => Some(s),
            Task::Number(_) => None,
        }
    }

    /// Parse CLI-style input: anything that parses as `f64` is a number.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) => Task::Number(n),
            Err(_) => Task::Text(raw.to_string()),
        }
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Task::Text(a), Task::Text(b)) => Some(a.cmp(b)),
            (Task::Number(a), Task::Number(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Text(s) => write!(f, "{}", s),
            Task::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Task {
    fn from(s: &str) -> Self {
        Task::Text(s.to_string())
    }
}

impl From<String> for Task {
    fn from(s: String) -> Self {
        Task::Text(s)
    }
}

impl From<f64> for Task {
    fn from(n: f64) -> Self {
        Task::Number(n)
    }
}

impl From<i64> for Task {
    fn from(n: i64) -> Self {
        Task::Number(n as f64)
    }
}

/// Ordered task sequence owned by a single agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlanner<T = Task> {
    tasks: Vec<T>,
}

impl<T> Default for TaskPlanner<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T> TaskPlanner<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the end. Duplicates are kept.
    pub fn add_task(&mut self, task: impl Into<T>) {
        self.tasks.push(task.into());
    }

    /// The current sequence, unchanged.
    pub fn create_task_sequence(&self) -> &[T] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> TaskPlanner<T>
where
    T: PartialOrd + Clone + fmt::Debug,
{
    /// A stably sorted copy of the sequence under the tasks' natural order.
    ///
    /// Fails with [`AgentError::Incomparable`] if any two tasks have no
    /// ordering (e.g. text mixed with numbers), rather than returning a
    /// partially sorted list. The planner's own sequence is not modified.
    pub fn optimize_task_execution(&self) -> Result<Vec<T>> {
        if self.tasks.len() > 1 {
            check_comparable(&self.tasks)?;
        }
        let mut sorted = self.tasks.clone();
        // Every pair is comparable at this point.
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        tracing::debug!(tasks = sorted.len(), "Optimized task order");
        Ok(sorted)
    }
}

/// Every pair of elements, each element with itself included, must have an
/// ordering. Quadratic; plans are small.
fn check_comparable<T: PartialOrd + fmt::Debug>(tasks: &[T]) -> Result<()> {
    for (i, left) in tasks.iter().enumerate() {
        for right in &tasks[i..] {
            if left.partial_cmp(right).is_none() {
                return Err(AgentError::Incomparable {
                    left: format!("{:?}", left),
                    right: format!("{:?}", right),
                });
            }
        }
    }
    Ok(())
}

impl<T> Extend<T> for TaskPlanner<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tasks.extend(iter);
    }
}

impl<T> FromIterator<T> for TaskPlanner<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}
