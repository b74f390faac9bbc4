//! Interactive chat module
//!
//! Provides a readline-based group chat with a running conversation context.

mod repl;

pub use repl::ChatRepl;
