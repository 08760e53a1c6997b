//! agentlab CLI library, shared by the `agentlab` binary and its tests.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

use agentlab_core::observability::{self, TracingMode};

/// Run the CLI: parse args, set up tracing and the audit log, dispatch.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    agentlab_core::config::load_dotenv();
    observability::init_tracing(if cli.command.machine_output() {
        TracingMode::Quiet
    } else {
        TracingMode::Default
    });
    if let Some(ref path) = cli.audit_log {
        observability::set_audit_path(Some(path.as_path()));
    }

    match cli.command {
        Commands::Demo { name, tasks } => commands::agent::cmd_demo(name, &tasks),
        Commands::Plan { tasks, optimize } => commands::agent::cmd_plan(&tasks, optimize),
        Commands::Memory => commands::agent::cmd_memory(),
        Commands::Cases {
            cases,
            device_type,
            min_score,
            max_score,
            json,
        } => {
            let range = min_score.zip(max_score);
            commands::financing::cmd_cases(cases.as_deref(), device_type.as_deref(), range, json)
        }
        Commands::Analyze { id, cases, json } => {
            commands::financing::cmd_analyze(id, cases.as_deref(), json)
        }
        Commands::Train { cases, limit } => commands::financing::cmd_train(cases.as_deref(), limit),
        Commands::Evaluate { cases, json } => {
            commands::financing::cmd_evaluate(cases.as_deref(), json)
        }
        Commands::ExportTrainingData { cases } => {
            commands::financing::cmd_export_training_data(cases.as_deref())
        }
    }
}
