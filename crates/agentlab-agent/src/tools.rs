//! Tools: selection by predicate, execution, and a builder-style registry.
//!
//! Pattern: `ToolRegistry::builder().register(cleaning_tools()).build();`

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::error::{AgentError, Result};
use crate::task_planner::Task;

/// Signature of a callable tool body.
pub type ToolFn = Arc<dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// What a tool wraps: something callable, or an inert descriptor that is not.
#[derive(Clone)]
pub enum ToolTarget {
    Callable(ToolFn),
    Inert(Value),
}

impl ToolTarget {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        ToolTarget::Callable(Arc::new(f))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, ToolTarget::Callable(_))
    }
}

impl fmt::Debug for ToolTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolTarget::Callable(_) => write!(f, "Callable(<fn>)"),
            ToolTarget::Inert(v) => write!(f, "Inert({})", v),
        }
    }
}

/// Return the subset of `tools` for which `criteria` holds, in input order.
pub fn select_tool<'a, T, F>(tools: &'a [T], criteria: F) -> Vec<&'a T>
where
    F: Fn(&T) -> bool,
{
    tools.iter().filter(|t| criteria(*t)).collect()
}

/// Call `target` with `args` and return exactly what it returns.
///
/// An inert target fails with [`AgentError::InvalidTool`]; an error from the
/// callable itself comes back as [`AgentError::ToolFailed`] with the original
/// error as its source.
pub fn execute_tool(target: &ToolTarget, args: &[Value]) -> Result<Value> {
    invoke(None, target, args)
}

fn invoke(name: Option<&str>, target: &ToolTarget, args: &[Value]) -> Result<Value> {
    match target {
        ToolTarget::Callable(f) => f(args).map_err(|source| AgentError::ToolFailed {
            name: name.unwrap_or("anonymous").to_string(),
            source,
        }),
        ToolTarget::Inert(v) => Err(AgentError::InvalidTool(match name {
            Some(n) => format!("{} ({})", n, v),
            None => v.to_string(),
        })),
    }
}

/// A named tool an agent can use.
#[derive(Debug, Clone)]
pub struct Tool {
    pub name: String,
    pub function: ToolTarget,
    pub description: Option<String>,
}

impl Tool {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: ToolTarget::callable(f),
            description: None,
        }
    }

    /// A tool whose target is a plain value; using it fails with `InvalidTool`.
    pub fn inert(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            function: ToolTarget::Inert(value.into()),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Use the tool with the given arguments.
    pub fn use_tool(&self, args: &[Value]) -> Result<Value> {
        invoke(Some(&self.name), &self.function, args)
    }
}

/// Registry of the tools available to one agent.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

/// Builder for ToolRegistry with explicit tool registration.
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<Tool>,
}

impl ToolRegistryBuilder {
    /// Register tools from a provider. Add one line per tool module.
    #[must_use]
    pub fn register(mut self, tools: impl IntoIterator<Item = Tool>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Build the registry. A later tool with an already registered name
    /// replaces the earlier one in place.
    pub fn build(self) -> ToolRegistry {
        let mut registry = ToolRegistry::default();
        for tool in self.tools {
            registry.insert(tool);
        }
        registry
    }
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    pub fn insert(&mut self, tool: Tool) {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn select<F>(&self, criteria: F) -> Vec<&Tool>
    where
        F: Fn(&Tool) -> bool,
    {
        select_tool(&self.tools, criteria)
    }

    /// First tool whose name appears in the task text (case-insensitive).
    /// Numeric tasks never match.
    pub fn select_for_task(&self, task: &Task) -> Option<&Tool> {
        let text = task.as_text()?.to_lowercase();
        self.select(|t| !t.name.is_empty() && text.contains(&t.name.to_lowercase()))
            .into_iter()
            .next()
    }

    /// Execute a tool by name.
    pub fn execute(&self, name: &str, args: &[Value]) -> Result<Value> {
        let tool = self
            .find(name)
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))?;
        let started = Instant::now();
        let result = tool.use_tool(args);
        let elapsed = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(tool = %name, elapsed_ms = elapsed, "Tool executed"),
            Err(e) => tracing::warn!(tool = %name, error = %e, "Tool execution failed"),
        }
        agentlab_core::observability::audit_tool_executed(name, result.is_ok(), elapsed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tools() -> Vec<Tool> {
        vec![
            Tool::new("broom", |_| Ok(json!("swept"))),
            Tool::new("sum", |args| {
                let total: i64 = args.iter().filter_map(Value::as_i64).sum();
                Ok(json!(total))
            }),
            Tool::inert("manual", json!({"pages": 12})),
            Tool::new("vacuum", |_| anyhow::bail!("bag is full")),
        ]
    }

    #[test]
    fn test_select_tool_preserves_order() {
        let tools = sample_tools();
        let callable = select_tool(&tools, |t| t.function.is_callable());
        let names: Vec<&str> = callable.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["broom", "sum", "vacuum"]);
    }

    #[test]
    fn test_select_tool_over_plain_values() {
        let values = [4, 7, 1, 8, 3];
        let picked = select_tool(&values, |v| *v > 3);
        assert_eq!(picked, vec![&4, &7, &8]);
        assert!(select_tool(&values, |_| false).is_empty());
    }

    #[test]
    fn test_execute_tool_returns_callable_value() {
        let target = ToolTarget::callable(|args| Ok(json!(args.len())));
        let out = execute_tool(&target, &[json!(1), json!("two")]).unwrap();
        assert_eq!(out, json!(2));
    }

    #[test]
    fn test_execute_tool_non_callable_fails() {
        let target = ToolTarget::Inert(json!("just a string"));
        let err = execute_tool(&target, &[]).unwrap_err();
        assert!(matches!(err, AgentError::InvalidTool(_)));
    }

    #[test]
    fn test_tool_failure_keeps_source() {
        let tools = sample_tools();
        let err = tools[3].use_tool(&[]).unwrap_err();
        match err {
            AgentError::ToolFailed { name, source } => {
                assert_eq!(name, "vacuum");
                assert_eq!(source.to_string(), "bag is full");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_registry_execute_and_unknown() {
        let registry = ToolRegistry::builder().register(sample_tools()).build();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.execute("sum", &[json!(2), json!(5)]).unwrap(),
            json!(7)
        );
        assert!(matches!(
            registry.execute("hammer", &[]),
            Err(AgentError::UnknownTool(_))
        ));
        assert!(matches!(
            registry.execute("manual", &[]),
            Err(AgentError::InvalidTool(_))
        ));
    }

    #[test]
    fn test_registry_replaces_duplicate_names() {
        let registry = ToolRegistry::builder()
            .register(vec![Tool::new("broom", |_| Ok(json!(1)))])
            .register(vec![Tool::new("broom", |_| Ok(json!(2)))])
            .build();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.execute("broom", &[]).unwrap(), json!(2));
    }

    #[test]
    fn test_select_for_task_by_name() {
        let registry = ToolRegistry::builder().register(sample_tools()).build();
        let task = Task::from("Grab the Broom and sweep");
        assert_eq!(registry.select_for_task(&task).unwrap().name, "broom");
        assert!(registry.select_for_task(&Task::from("water plants")).is_none());
        assert!(registry.select_for_task(&Task::Number(1.0)).is_none());
    }
}
