//! Orchestration domain
//!
//! Modes, turns, the debate state machine and the result types produced
//! by a collaboration run.

pub mod debate;
pub mod entities;
pub mod mode;
pub mod value_objects;
