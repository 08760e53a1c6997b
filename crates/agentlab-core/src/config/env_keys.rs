//! Environment variable keys and their aliases.
//!
//! Primary keys use the `AGENTLAB_*` prefix; the `AGENT_*` spellings are
//! accepted as legacy aliases.

/// Logging and audit
pub mod observability {
    pub const AGENTLAB_QUIET: &str = "AGENTLAB_QUIET";
    pub const QUIET_ALIASES: &[&str] = &["AGENT_QUIET"];

    pub const AGENTLAB_LOG_LEVEL: &str = "AGENTLAB_LOG_LEVEL";
    pub const LOG_LEVEL_ALIASES: &[&str] = &["AGENT_LOG_LEVEL"];

    pub const AGENTLAB_LOG_JSON: &str = "AGENTLAB_LOG_JSON";
    pub const LOG_JSON_ALIASES: &[&str] = &["AGENT_LOG_JSON"];

    pub const AGENTLAB_AUDIT_LOG: &str = "AGENTLAB_AUDIT_LOG";
    pub const AUDIT_LOG_ALIASES: &[&str] = &["AGENT_AUDIT_LOG"];
}

/// Toy agent defaults
pub mod agent {
    pub const AGENTLAB_AGENT_NAME: &str = "AGENTLAB_AGENT_NAME";
    pub const AGENT_NAME_ALIASES: &[&str] = &["AGENT_NAME"];
}

/// Device financing agent
pub mod financing {
    pub const AGENTLAB_CASES_FILE: &str = "AGENTLAB_CASES_FILE";
    pub const AGENTLAB_DECISION_THRESHOLD: &str = "AGENTLAB_DECISION_THRESHOLD";
}
