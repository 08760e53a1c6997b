//! Observability: tracing init and the JSONL audit log.
//!
//! Uses config::ObservabilityConfig for AGENTLAB_QUIET, LOG_LEVEL, LOG_JSON, AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

static AUDIT_PATH: Mutex<Option<String>> = Mutex::new(None);

/// Tracing initialization mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingMode {
    /// Use AGENTLAB_LOG_LEVEL / AGENTLAB_QUIET from env
    Default,
    /// Machine-readable output on stdout: only warnings and errors are logged
    Quiet,
}

/// Build the filter directive for the given mode and config values.
pub fn filter_directive(mode: TracingMode, quiet: bool, log_level: &str) -> String {
    if quiet || matches!(mode, TracingMode::Quiet) {
        "agentlab=warn".to_string()
    } else {
        log_level.to_string()
    }
}

/// Initialize tracing. Call once at process startup; later calls are no-ops.
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr.
pub fn init_tracing(mode: TracingMode) {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = filter_directive(mode, cfg.quiet, &cfg.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

/// Override the audit log destination (e.g. from a CLI flag). `None` falls
/// back to AGENTLAB_AUDIT_LOG on the next write.
pub fn set_audit_path(path: Option<&Path>) {
    if let Ok(mut guard) = AUDIT_PATH.lock() {
        *guard = path.map(|p| p.to_string_lossy().to_string());
    }
}

fn get_audit_path() -> Option<String> {
    {
        let guard = AUDIT_PATH.lock().ok()?;
        if let Some(ref p) = *guard {
            return Some(p.clone());
        }
    }
    let path = crate::config::ObservabilityConfig::from_env().audit_log.clone()?;
    if path.is_empty() {
        return None;
    }
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    {
        let mut guard = AUDIT_PATH.lock().ok()?;
        *guard = Some(path.clone());
    }
    Some(path)
}

fn append_jsonl(path: &str, record: &serde_json::Value) {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(mut f) => {
            if let Ok(line) = serde_json::to_string(record) {
                let _ = writeln!(f, "{}", line);
            }
        }
        Err(e) => tracing::warn!(path = %path, error = %e, "Failed to open audit log"),
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Audit: tool_executed
pub fn audit_tool_executed(tool_name: &str, success: bool, duration_ms: u64) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": timestamp(),
            "event": "tool_executed",
            "tool": tool_name,
            "success": success,
            "duration_ms": duration_ms,
        });
        append_jsonl(&path, &record);
    }
}

/// Audit: task_completed
pub fn audit_task_completed(agent: &str, task: &str, tool: Option<&str>) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": timestamp(),
            "event": "task_completed",
            "agent": agent,
            "task": task,
            "tool": tool,
        });
        append_jsonl(&path, &record);
    }
}

/// Audit: decision_made (financing agent)
pub fn audit_decision_made(agent_id: &str, case_id: u32, option_id: &str, confidence: f64) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": timestamp(),
            "event": "decision_made",
            "agent_id": agent_id,
            "case_id": case_id,
            "option_id": option_id,
            "confidence": confidence,
        });
        append_jsonl(&path, &record);
    }
}
