//! Unified configuration layer.
//!
//! Every environment variable read goes through this module; business code
//! uses the structured configs instead of calling `std::env::var` directly.
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool` helpers and `.env` loading
//! - `schema`: `ObservabilityConfig`, `AgentConfig`, `FinancingConfig`
//! - `env_keys`: key constants (with legacy aliases)

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv, load_dotenv_from_dir};
pub use schema::{AgentConfig, FinancingConfig, ObservabilityConfig};
