//! Application services shared by the use cases

pub mod completion_client;
pub mod intent_classifier;
pub mod synthesizer;
