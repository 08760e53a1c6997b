use serde_json::Value;

use super::{task_key, Agent, PlanProgress, TaskReport, TaskStatus};
use crate::error::Result;
use crate::memory::MemoryStore;
use crate::task_planner::{Task, TaskPlanner};
use crate::tools::ToolRegistry;

/// Agent that performs tasks one at a time with whichever registered tool
/// matches the task by name.
#[derive(Debug, Clone)]
pub struct SimpleAgent {
    name: String,
    memory: MemoryStore,
    planner: TaskPlanner,
    tools: ToolRegistry,
    progress: PlanProgress,
}

impl SimpleAgent {
    pub fn new(name: impl Into<String>, tools: ToolRegistry) -> Self {
        Self {
            name: name.into(),
            memory: MemoryStore::new(),
            planner: TaskPlanner::new(),
            tools,
            progress: PlanProgress::default(),
        }
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryStore {
        &mut self.memory
    }

    pub fn planner(&self) -> &TaskPlanner {
        &self.planner
    }

    pub fn planner_mut(&mut self) -> &mut TaskPlanner {
        &mut self.planner
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Next planned task not yet performed.
    pub fn next_task(&self) -> Option<&Task> {
        self.progress.next(&self.planner)
    }

    pub fn progress(&self) -> PlanProgress {
        self.progress
    }

    /// Record the task as pending, pick a tool, then mark it completed.
    ///
    /// Not finding a tool is logged but is not an error: the task still
    /// completes, with `tool: None` in the report.
    pub fn perform_task(&mut self, task: impl Into<Task>) -> Result<TaskReport> {
        let task = task.into();
        let key = task_key(&task);
        let text = task.to_string();
        self.memory.store(key.clone(), TaskStatus::Pending);

        let tool = self.tools.select_for_task(&task).map(|t| t.name.clone());
        match tool {
            Some(ref name) => {
                tracing::info!(agent = %self.name, tool = %name, task = %task, "Performing task");
            }
            None => tracing::warn!(agent = %self.name, task = %task, "No tool matched task"),
        }

        self.memory.update(&key, TaskStatus::Completed)?;
        agentlab_core::observability::audit_task_completed(&self.name, &text, tool.as_deref());
        Ok(TaskReport {
            agent: self.name.clone(),
            task,
            tool,
            status: TaskStatus::Completed,
        })
    }
}

impl Agent for SimpleAgent {
    fn name(&self) -> &str {
        &self.name
    }

    /// Perform the next planned task. A failed task stays next.
    fn act(&mut self) -> Result<()> {
        if let Some(task) = self.next_task().cloned() {
            self.perform_task(task)?;
            self.progress.advance();
        }
        Ok(())
    }

    /// Keeps only the latest experience.
    fn learn(&mut self, experience: Value) -> Result<()> {
        self.memory.store("experience", experience);
        Ok(())
    }
}
