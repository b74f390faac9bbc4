//! Use cases (application services)

pub mod protocols;
pub mod run_consensus;
