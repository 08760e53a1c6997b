//! Configuration structs grouped by domain.
//!
//! Loaded from environment variables with the shared fallback rules.

use super::env_keys::{agent as agent_keys, financing as fin_keys, observability as obv_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// Logging and audit configuration: quiet, log_level, log_json, audit_log.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    /// Process-wide cached config (the environment is read once).
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(Self::load)
    }

    /// Read the environment now, bypassing the cache.
    pub fn load() -> Self {
        super::loader::load_dotenv();
        let quiet = env_bool(obv_keys::AGENTLAB_QUIET, obv_keys::QUIET_ALIASES, false);
        let log_level = env_or(
            obv_keys::AGENTLAB_LOG_LEVEL,
            obv_keys::LOG_LEVEL_ALIASES,
            || "agentlab=info".to_string(),
        );
        let log_json = env_bool(obv_keys::AGENTLAB_LOG_JSON, obv_keys::LOG_JSON_ALIASES, false);
        let audit_log = env_optional(obv_keys::AGENTLAB_AUDIT_LOG, obv_keys::AUDIT_LOG_ALIASES);
        Self {
            quiet,
            log_level,
            log_json,
            audit_log,
        }
    }
}

/// Defaults for the toy agents driven from the CLI.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub default_name: String,
}

impl AgentConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            default_name: env_or(
                agent_keys::AGENTLAB_AGENT_NAME,
                agent_keys::AGENT_NAME_ALIASES,
                || "Agent007".to_string(),
            ),
        }
    }
}

/// Device financing agent settings.
#[derive(Debug, Clone)]
pub struct FinancingConfig {
    /// Case catalog override; `None` uses the compiled-in seed.
    pub cases_file: Option<PathBuf>,
    pub decision_threshold: f64,
}

impl FinancingConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        let cases_file = env_optional(fin_keys::AGENTLAB_CASES_FILE, &[]).map(PathBuf::from);
        let decision_threshold = env_optional(fin_keys::AGENTLAB_DECISION_THRESHOLD, &[])
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| (0.0..=1.0).contains(v))
            .unwrap_or(0.7);
        Self {
            cases_file,
            decision_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financing_config_rejects_out_of_range_threshold() {
        std::env::set_var(fin_keys::AGENTLAB_DECISION_THRESHOLD, "1.5");
        let cfg = FinancingConfig::from_env();
        assert_eq!(cfg.decision_threshold, 0.7);

        std::env::set_var(fin_keys::AGENTLAB_DECISION_THRESHOLD, "0.55");
        let cfg = FinancingConfig::from_env();
        assert_eq!(cfg.decision_threshold, 0.55);
        std::env::remove_var(fin_keys::AGENTLAB_DECISION_THRESHOLD);
    }
}
