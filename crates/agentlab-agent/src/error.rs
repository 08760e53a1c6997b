//! Error taxonomy for the agent toolkit.

use thiserror::Error;

/// Errors raised by memory, planner, tools and agents. None of these are
/// caught inside the crate; they propagate to whoever made the call.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Memory key '{0}' not found")]
    KeyNotFound(String),

    #[error("Agent '{agent}' does not implement '{capability}'")]
    NotImplemented {
        agent: String,
        capability: &'static str,
    },

    #[error("The provided tool is not callable: {0}")]
    InvalidTool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool '{name}' failed: {source}")]
    ToolFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Tasks are not mutually comparable: {left} vs {right}")]
    Incomparable { left: String, right: String },
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::KeyNotFound("t1".into());
        assert_eq!(err.to_string(), "Memory key 't1' not found");

        let err = AgentError::NotImplemented {
            agent: "Agent007".into(),
            capability: "act",
        };
        assert_eq!(err.to_string(), "Agent 'Agent007' does not implement 'act'");
    }
}
