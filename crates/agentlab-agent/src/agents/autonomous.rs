use serde_json::Value;
use uuid::Uuid;

use super::{
    task_key, Agent, DecisionMaker, PlanProgress, TaskExecutor, TaskReport, TaskStatus, ToolUser,
};
use crate::error::Result;
use crate::memory::MemoryStore;
use crate::task_planner::{Task, TaskPlanner};
use crate::tools::ToolRegistry;

const LAST_TOOL_KEY: &str = "last_tool";
const DECISION_CONTEXT_KEY: &str = "last_decision_context";

/// Agent composing every capability: it plans, executes, uses tools,
/// decides and learns.
#[derive(Debug, Clone)]
pub struct AutonomousAgent {
    id: Uuid,
    name: String,
    memory: MemoryStore,
    planner: TaskPlanner,
    tools: ToolRegistry,
    progress: PlanProgress,
    experiences: usize,
}

impl AutonomousAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_tools(name, ToolRegistry::default())
    }

    pub fn with_tools(name: impl Into<String>, tools: ToolRegistry) -> Self {
        let name = name.into();
        let id = Uuid::new_v4();
        tracing::debug!(agent = %name, id = %id, tools = tools.len(), "Autonomous agent created");
        Self {
            id,
            name,
            memory: MemoryStore::new(),
            planner: TaskPlanner::new(),
            tools,
            progress: PlanProgress::default(),
            experiences: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
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

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Append a task to this agent's plan.
    pub fn plan(&mut self, task: impl Into<Task>) {
        self.planner.add_task(task);
    }

    /// Next planned task not yet performed.
    pub fn next_task(&self) -> Option<&Task> {
        self.progress.next(&self.planner)
    }

    pub fn progress(&self) -> PlanProgress {
        self.progress
    }

    /// Run the next planned task and move past it. A failed task stays next.
    fn step(&mut self) -> Result<Option<TaskReport>> {
        let Some(task) = self.next_task().cloned() else {
            return Ok(None);
        };
        let report = self.execute_task(task)?;
        self.progress.advance();
        Ok(Some(report))
    }

    /// Run every outstanding planned task in plan order.
    pub fn run_plan(&mut self) -> Result<Vec<TaskReport>> {
        let mut reports = Vec::new();
        while let Some(report) = self.step()? {
            reports.push(report);
        }
        Ok(reports)
    }
}

impl Agent for AutonomousAgent {
    fn name(&self) -> &str {
        &self.name
    }

    /// Execute the next outstanding task. An empty plan is a no-op.
    fn act(&mut self) -> Result<()> {
        if self.step()?.is_none() {
            tracing::info!(agent = %self.name, "Nothing left to do");
        }
        Ok(())
    }

    /// Each experience is kept under its own `experience:<n>` key.
    fn learn(&mut self, experience: Value) -> Result<()> {
        let key = format!("experience:{}", self.experiences);
        tracing::info!(agent = %self.name, key = %key, "Learning from experience");
        self.memory.store(key, experience);
        self.experiences += 1;
        Ok(())
    }
}

impl TaskExecutor for AutonomousAgent {
    fn execute_task(&mut self, task: Task) -> Result<TaskReport> {
        let key = task_key(&task);
        let text = task.to_string();
        let tool = self.tools.select_for_task(&task).map(|t| t.name.clone());
        self.memory.store(key.clone(), TaskStatus::InProgress);
        tracing::info!(agent = %self.name, task = %text, tool = ?tool, "Executing task");

        if let Some(ref name) = tool {
            self.interact_with_tool(name, &[Value::String(text.clone())])?;
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

impl ToolUser for AutonomousAgent {
    fn interact_with_tool(&mut self, tool: &str, args: &[Value]) -> Result<Value> {
        tracing::info!(agent = %self.name, tool = %tool, "Using tool");
        let output = self.tools.execute(tool, args)?;
        self.memory.store(LAST_TOOL_KEY, tool);
        Ok(output)
    }
}

impl DecisionMaker for AutonomousAgent {
    /// Remember the context and pick the next planned task, if any.
    fn make_decision(&mut self, context: &Value) -> Result<Option<Task>> {
        self.memory.store(DECISION_CONTEXT_KEY, context.clone());
        let next = self.next_task().cloned();
        tracing::info!(agent = %self.name, next = ?next, "Decision made");
        Ok(next)
    }
}
