//! Environment variable loading.
//!
//! Keeps the primary → alias → default fallback chain in one place so that
//! callers never repeat `or_else` ladders.

use std::env;
use std::path::Path;

/// Load `.env` from the current directory into the process environment.
/// Existing variables are never overridden. Runs at most once per process.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let dir = env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
        load_dotenv_from_dir(&dir);
    });
}

/// Load `<dir>/.env` into the process environment without overriding
/// existing variables. A missing file is not an error.
pub fn load_dotenv_from_dir(dir: &Path) {
    let path = dir.join(".env");
    let Ok(content) = std::fs::read_to_string(&path) else {
        return;
    };
    let mut applied = 0usize;
    for (key, value) in parse_dotenv(&content) {
        if env::var(&key).is_err() {
            env::set_var(&key, &value);
            applied += 1;
        }
    }
    tracing::debug!(path = %path.display(), applied, "Loaded .env");
}

/// Parse `.env` content into key/value pairs.
///
/// Blank lines and `#` comments are skipped, an unquoted trailing `# ...`
/// is stripped, and one layer of matching single or double quotes is
/// removed from the value.
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(eq_pos) = line.find('=') else {
            continue;
        };
        let key = line[..eq_pos].trim();
        let mut value = line[eq_pos + 1..].trim();
        // Strip inline comment (# not inside quotes)
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if !key.is_empty() {
            pairs.push((key.to_string(), value.to_string()));
        }
    }
    pairs
}

/// Read the primary variable or the first set alias; fall back to `default`.
/// Empty values count as unset.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

/// Read the primary variable or an alias as `Option` (blank is `None`).
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .and_then(|s| {
            let s = s.trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        })
}

/// Parse a boolean variable: 0/false/no/off are false, anything else set is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    let v = env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()));
    match v.as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotenv_basic() {
        let content = r#"
# comment
AGENTLAB_LOG_LEVEL=agentlab=debug
AGENTLAB_AGENT_NAME="Agent 007"
QUOTED='single'
TRAILING=value # inline comment
NO_EQUALS_LINE
=missing_key
"#;
        let pairs = parse_dotenv(content);
        assert_eq!(
            pairs,
            vec![
                ("AGENTLAB_LOG_LEVEL".to_string(), "agentlab=debug".to_string()),
                ("AGENTLAB_AGENT_NAME".to_string(), "Agent 007".to_string()),
                ("QUOTED".to_string(), "single".to_string()),
                ("TRAILING".to_string(), "value".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_dotenv_keeps_hash_inside_quotes() {
        let pairs = parse_dotenv(r#"KEY="a # b""#);
        assert_eq!(pairs, vec![("KEY".to_string(), "a # b".to_string())]);
    }

    #[test]
    fn test_env_or_alias_and_default() {
        env::set_var("AGENTLAB_TEST_ALIAS_ONLY", "from-alias");
        let v = env_or("AGENTLAB_TEST_PRIMARY_UNSET", &["AGENTLAB_TEST_ALIAS_ONLY"], || {
            "default".to_string()
        });
        assert_eq!(v, "from-alias");

        let d = env_or("AGENTLAB_TEST_NOTHING_SET", &[], || "default".to_string());
        assert_eq!(d, "default");
        env::remove_var("AGENTLAB_TEST_ALIAS_ONLY");
    }

    #[test]
    fn test_env_optional_blank_is_none() {
        env::set_var("AGENTLAB_TEST_BLANK", "   ");
        assert_eq!(env_optional("AGENTLAB_TEST_BLANK", &[]), None);
        env::remove_var("AGENTLAB_TEST_BLANK");
    }

    #[test]
    fn test_env_bool() {
        env::set_var("AGENTLAB_TEST_BOOL_OFF", "off");
        env::set_var("AGENTLAB_TEST_BOOL_ON", "1");
        assert!(!env_bool("AGENTLAB_TEST_BOOL_OFF", &[], true));
        assert!(env_bool("AGENTLAB_TEST_BOOL_ON", &[], false));
        assert!(env_bool("AGENTLAB_TEST_BOOL_UNSET", &[], true));
        env::remove_var("AGENTLAB_TEST_BOOL_OFF");
        env::remove_var("AGENTLAB_TEST_BOOL_ON");
    }

    #[test]
    fn test_load_dotenv_from_dir_does_not_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "AGENTLAB_TEST_DOTENV_NEW=fresh\nAGENTLAB_TEST_DOTENV_SET=from-file\n",
        )
        .unwrap();
        env::set_var("AGENTLAB_TEST_DOTENV_SET", "from-env");

        load_dotenv_from_dir(dir.path());

        assert_eq!(env::var("AGENTLAB_TEST_DOTENV_NEW").unwrap(), "fresh");
        assert_eq!(env::var("AGENTLAB_TEST_DOTENV_SET").unwrap(), "from-env");
        env::remove_var("AGENTLAB_TEST_DOTENV_NEW");
        env::remove_var("AGENTLAB_TEST_DOTENV_SET");
    }
}
