//! CLI command handlers.
//!
//!   agent:     demo, plan, memory (toy agent toolkit)
//!   financing: cases, analyze, train, evaluate, export-training-data

pub mod agent;
pub mod financing;
