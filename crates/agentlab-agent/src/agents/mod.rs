//! Agent capability traits and the shared task bookkeeping.
//!
//! [`Agent`] is the capability surface every agent must supply. The
//! autonomous variant additionally composes the independent
//! [`TaskExecutor`], [`ToolUser`] and [`DecisionMaker`] capabilities.

mod autonomous;
mod base;
mod simple;


pub use autonomous::AutonomousAgent;
pub use base::BaseAgent;
pub use simple::SimpleAgent;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::memory::MemoryStore;
use crate::task_planner::{Task, TaskPlanner};

/// Capabilities every agent provides. No default bodies.
pub trait Agent {
    fn name(&self) -> &str;

    /// Take the agent's next action.
    fn act(&mut self) -> Result<()>;

    /// Record an experience.
    fn learn(&mut self, experience: Value) -> Result<()>;
}

/// Runs a single task to completion.
pub trait TaskExecutor {
    fn execute_task(&mut self, task: Task) -> Result<TaskReport>;
}

/// Uses a named tool.
pub trait ToolUser {
    fn interact_with_tool(&mut self, tool: &str, args: &[Value]) -> Result<Value>;
}

/// Picks what to do next given some context.
pub trait DecisionMaker {
    fn make_decision(&mut self, context: &Value) -> Result<Option<Task>>;
}

/// Task lifecycle as recorded in agent memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl From<TaskStatus> for Value {
    fn from(status: TaskStatus) -> Self {
        Value::String(status.as_str().to_string())
    }
}

/// Outcome of running one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub agent: String,
    pub task: Task,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    pub status: TaskStatus,
}

/// Memory key a task's status is recorded under. Qualified by kind so the
/// number `1` and the text `"1"` do not share an entry.
pub fn task_key(task: &Task) -> String {
    match task {
        Task::Text(s) => format!("text:{}", s),
        Task::Number(n) => format!("number:{}", n),
    }
}

/// Status recorded in memory for `task`, if any.
pub fn task_status(memory: &MemoryStore, task: &Task) -> Option<TaskStatus> {
    memory.retrieve(&task_key(task)).and_then(TaskStatus::from_value)
}

/// How far an agent has worked through its plan, by position.
///
/// The plan is append-only, so every entry before `done` has been performed
/// and duplicates are each performed once per occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanProgress {
    done: usize,
}

impl PlanProgress {
    pub fn done(&self) -> usize {
        self.done
    }

    /// Next planned task not yet performed.
    pub fn next<'a>(&self, planner: &'a TaskPlanner) -> Option<&'a Task> {
        planner.create_task_sequence().get(self.done)
    }

    /// Planned tasks not yet performed, in plan order.
    pub fn remaining<'a>(&self, planner: &'a TaskPlanner) -> &'a [Task] {
        let tasks = planner.create_task_sequence();
        &tasks[self.done.min(tasks.len())..]
    }

    fn advance(&mut self) {
        self.done += 1;
    }
}

/// Explicit replacement for a class-wide instance counter: starts at zero
/// and counts each enrolled agent.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    created: u64,
    names: Vec<String>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly constructed agent. Returns the running total.
    pub fn enroll(&mut self, agent: &dyn Agent) -> u64 {
        self.created += 1;
        self.names.push(agent.name().to_string());
        tracing::debug!(agent = %agent.name(), total = self.created, "Agent enrolled");
        self.created
    }

    pub fn total_created(&self) -> u64 {
        self.created
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
