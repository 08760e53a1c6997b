use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// agentlab - toy agents, task planning and a device financing agent
#[derive(Parser, Debug)]
#[command(name = "agentlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Append audit events (JSONL) to this file. Overrides AGENTLAB_AUDIT_LOG.
    #[arg(long, global = true, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Let a simple agent perform tasks with its cleaning tools
    Demo {
        /// Agent name (default: AGENTLAB_AGENT_NAME or "Agent007")
        #[arg(long)]
        name: Option<String>,

        /// Tasks to perform (default: "clean the room")
        #[arg(value_name = "TASK")]
        tasks: Vec<String>,
    },

    /// Build a task plan and print it, optionally in optimized order
    Plan {
        /// Tasks in insertion order. Numeric arguments become numeric tasks.
        #[arg(value_name = "TASK", required = true)]
        tasks: Vec<String>,

        /// Print the sorted order instead of insertion order
        #[arg(long, default_value = "false")]
        optimize: bool,
    },

    /// Run the memory store/update/retrieve walkthrough
    Memory,

    /// List financing cases, optionally filtered
    Cases {
        /// Case catalog JSON (default: AGENTLAB_CASES_FILE or built-in cases)
        #[arg(long, value_name = "FILE")]
        cases: Option<PathBuf>,

        /// Only cases for this device type (case-insensitive)
        #[arg(long)]
        device_type: Option<String>,

        /// Minimum customer credit score (inclusive)
        #[arg(long, requires = "max_score")]
        min_score: Option<u32>,

        /// Maximum customer credit score (inclusive)
        #[arg(long, requires = "min_score")]
        max_score: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Analyze one financing case and print the recommendation
    Analyze {
        /// Case id
        #[arg(value_name = "ID")]
        id: u32,

        #[arg(long, value_name = "FILE")]
        cases: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Train the financing agent on the catalog and report accuracy
    Train {
        #[arg(long, value_name = "FILE")]
        cases: Option<PathBuf>,

        /// Only use the first N cases
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Evaluate the financing agent against every case's known optimum
    Evaluate {
        #[arg(long, value_name = "FILE")]
        cases: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the catalog as input/expected-output training data (JSON)
    ExportTrainingData {
        #[arg(long, value_name = "FILE")]
        cases: Option<PathBuf>,
    },
}

impl Commands {
    /// Commands whose stdout is meant for machines.
    pub fn machine_output(&self) -> bool {
        matches!(
            self,
            Commands::Cases { json: true, .. }
                | Commands::Analyze { json: true, .. }
                | Commands::Evaluate { json: true, .. }
                | Commands::ExportTrainingData { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plan_requires_tasks() {
        assert!(Cli::try_parse_from(["agentlab", "plan"]).is_err());
        let cli = Cli::try_parse_from(["agentlab", "plan", "b", "a", "--optimize"]).unwrap();
        match cli.command {
            Commands::Plan { tasks, optimize } => {
                assert_eq!(tasks, vec!["b", "a"]);
                assert!(optimize);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_score_range_needs_both_bounds() {
        assert!(Cli::try_parse_from(["agentlab", "cases", "--min-score", "600"]).is_err());
        let cli = Cli::try_parse_from([
            "agentlab",
            "cases",
            "--min-score",
            "600",
            "--max-score",
            "700",
            "--json",
        ])
        .unwrap();
        assert!(cli.command.machine_output());
    }

    #[test]
    fn test_global_audit_log_flag() {
        let cli = Cli::try_parse_from(["agentlab", "demo", "--audit-log", "/tmp/a.jsonl"]).unwrap();
        assert_eq!(cli.audit_log, Some(PathBuf::from("/tmp/a.jsonl")));
        assert!(!cli.command.machine_output());
    }
}
