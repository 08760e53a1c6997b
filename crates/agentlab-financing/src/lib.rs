//! agentlab-financing: a rule-based device financing agent.
//!
//! - **types**: cases, options, customers, decisions and metrics
//! - **payments**: amortisation helpers
//! - **cases**: the case catalog (built-in seed or a JSON file)
//! - **agent**: [`FinancingAgent`], which scores options, trains and evaluates

pub mod agent;
pub mod cases;
pub mod error;
pub mod payments;
pub mod types;

pub use agent::{ConfigUpdate, FinancingAgent};
pub use cases::CaseCatalog;
pub use error::{FinancingError, Result};
pub use payments::{calculate_monthly_payment, calculate_total_cost};
pub use types::*;
