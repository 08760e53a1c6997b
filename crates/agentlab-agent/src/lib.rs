//! In-process agent toolkit.
//!
//! An agent has a name, owns a [`MemoryStore`] and a [`TaskPlanner`], and
//! picks tools out of a [`ToolRegistry`] by predicate. Everything here is
//! single-threaded and lives as long as the owning agent.

pub mod agents;
pub mod error;
pub mod memory;
pub mod task_planner;
pub mod tools;

pub use agents::{
    Agent, AgentRegistry, AutonomousAgent, BaseAgent, DecisionMaker, PlanProgress, SimpleAgent,
    TaskExecutor, TaskReport, TaskStatus, ToolUser,
};
pub use error::{AgentError, Result};
pub use memory::MemoryStore;
pub use task_planner::{Task, TaskPlanner};
pub use tools::{execute_tool, select_tool, Tool, ToolRegistry, ToolTarget};
