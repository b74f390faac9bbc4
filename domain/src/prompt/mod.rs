//! Prompt domain
//!
//! Templates for every stage of a collaboration run, plus the intent
//! classifier's prompts and response parsing.

mod classifier;
mod template;

pub use classifier::{ClassifierPrompt, DEFAULT_CONFIDENCE, parse_classification_detail};
pub use template::PromptTemplate;
