//! Toy agent commands: demo, plan, memory.

use anyhow::{Context, Result};
use serde_json::json;

use agentlab_agent::{
    Agent, AgentRegistry, MemoryStore, SimpleAgent, Task, TaskPlanner, TaskReport, Tool,
    ToolRegistry,
};
use agentlab_core::config::AgentConfig;

const DEFAULT_TASK: &str = "clean the room";

/// Tools every demo agent carries.
pub fn cleaning_tools() -> Vec<Tool> {
    vec![
        Tool::new("broom", |_| Ok(json!("floor swept"))).with_description("Sweeps hard floors"),
        Tool::new("mop", |_| Ok(json!("floor mopped"))).with_description("Wet-cleans hard floors"),
        Tool::new("vacuum", |args| Ok(json!({ "vacuumed": args.len() })))
            .with_description("Vacuums carpets and rugs"),
        Tool::new("duster", |_| Ok(json!("shelves dusted"))).with_description("Dusts shelves"),
        Tool::new("clean", |_| Ok(json!("room tidied")))
            .with_description("General tidy-up when nothing more specific applies"),
    ]
}

fn render_report(report: &TaskReport) -> String {
    match report.tool {
        Some(ref tool) => format!(
            "{} performed '{}' using {} [{}]",
            report.agent,
            report.task,
            tool,
            report.status.as_str()
        ),
        None => format!(
            "{} performed '{}' without a tool [{}]",
            report.agent,
            report.task,
            report.status.as_str()
        ),
    }
}

/// `agentlab demo`
pub fn cmd_demo(name: Option<String>, tasks: &[String]) -> Result<()> {
    let name = name.unwrap_or_else(|| AgentConfig::from_env().default_name);
    let tools = ToolRegistry::builder().register(cleaning_tools()).build();

    let mut registry = AgentRegistry::new();
    let mut agent = SimpleAgent::new(name, tools);
    registry.enroll(&agent);

    let tasks: Vec<Task> = if tasks.is_empty() {
        vec![Task::from(DEFAULT_TASK)]
    } else {
        tasks.iter().map(|t| Task::parse(t)).collect()
    };

    eprintln!("🤖 {} has {} tools", agent.name(), agent.tools().len());
    for task in tasks {
        let report = agent.perform_task(task)?;
        println!("{}", render_report(&report));
    }

    println!();
    println!("Memory:");
    for key in agent.memory().keys() {
        if let Some(value) = agent.memory().retrieve(key) {
            println!("  {} = {}", key, value);
        }
    }
    println!("Agents created: {}", registry.total_created());
    Ok(())
}

fn render_plan(tasks: &[Task]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `agentlab plan`
pub fn cmd_plan(tasks: &[String], optimize: bool) -> Result<()> {
    let planner: TaskPlanner = tasks.iter().map(|t| Task::parse(t)).collect();
    let output = if optimize {
        let sorted = planner
            .optimize_task_execution()
            .context("Cannot optimize this plan")?;
        render_plan(&sorted)
    } else {
        render_plan(planner.create_task_sequence())
    };
    println!("{}", output);
    Ok(())
}

/// `agentlab memory`
pub fn cmd_memory() -> Result<()> {
    let mut memory = MemoryStore::new();

    memory.store("t1", "pending");
    println!("store(\"t1\", \"pending\")");
    memory.update("t1", "done")?;
    println!("update(\"t1\", \"done\")");

    match memory.retrieve("t1") {
        Some(value) => println!("retrieve(\"t1\") -> {}", value),
        None => println!("retrieve(\"t1\") -> <absent>"),
    }
    if let Err(e) = memory.update("t2", "done") {
        println!("update(\"t2\", \"done\") -> error: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentlab_agent::TaskStatus;

    #[test]
    fn test_render_plan_numbers_tasks() {
        let tasks = vec![Task::from("buy milk"), Task::Number(2.5)];
        assert_eq!(render_plan(&tasks), "1. buy milk\n2. 2.5");
        assert_eq!(render_plan(&[]), "");
    }

    #[test]
    fn test_render_report_with_and_without_tool() {
        let mut report = TaskReport {
            agent: "Agent007".into(),
            task: Task::from("sweep with broom"),
            tool: Some("broom".into()),
            status: TaskStatus::Completed,
        };
        assert_eq!(
            render_report(&report),
            "Agent007 performed 'sweep with broom' using broom [completed]"
        );
        report.tool = None;
        assert!(render_report(&report).contains("without a tool"));
    }

    #[test]
    fn test_cleaning_tools_are_unique_and_callable() {
        let registry = ToolRegistry::builder().register(cleaning_tools()).build();
        assert_eq!(registry.len(), cleaning_tools().len());
        assert_eq!(registry.select(|t| t.function.is_callable()).len(), registry.len());
        assert_eq!(registry.execute("mop", &[]).unwrap(), json!("floor mopped"));
    }

    #[test]
    fn test_default_task_finds_a_tool() {
        let tools = ToolRegistry::builder().register(cleaning_tools()).build();
        let mut agent = SimpleAgent::new("Agent007", tools);
        let report = agent.perform_task(DEFAULT_TASK).unwrap();
        assert_eq!(report.tool.as_deref(), Some("clean"));

        // Specific tools still win over the general one.
        let report = agent.perform_task("clean with the mop").unwrap();
        assert_eq!(report.tool.as_deref(), Some("mop"));
    }
}
