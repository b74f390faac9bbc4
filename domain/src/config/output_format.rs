//! Output format value object

use serde::{Deserialize, Serialize};

/// How an orchestration result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every turn followed by the final answer
    Full,
    /// Only the final consensus answer
    #[default]
    Final,
    /// The raw result as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_final() {
        assert_eq!(OutputFormat::default(), OutputFormat::Final);
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
