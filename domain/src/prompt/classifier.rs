//! Intent classification prompts and response parsing

use crate::core::message::ChatMessage;
use crate::orchestration::mode::CollaborationMode;
use crate::orchestration::value_objects::ClassificationDetail;

const CLASSIFIER_SYSTEM: &str = r#"You are the intent classification engine of a multi-agent group chat.
Route each user query to the collaboration mode that serves it best.

## MODES

### independent (comparison)
Parallel, diverse perspectives.
Choose when the user compares things, asks for alternatives, options, pros and cons,
"which is better", brainstorming or several approaches.
Examples: "Compare React vs Vue", "Pros and cons of remote work", "Ideas for a novel".

### support (supplement)
Sequential, cumulative explanation.
Choose for explanations, tutorials, how-to and step-by-step requests on established,
non-controversial topics.
Examples: "Explain how a jet engine works", "How to deploy a Docker container".

### opposition (debate)
Adversarial fact-checking.
Choose when the user asks to verify, fact-check, critique or debate a claim, or when
the topic is controversial or the claim sounds questionable.
Examples: "Is it true that coffee stunts growth?", "Debate: should AI be regulated?".

## RESPONSE FORMAT
Respond with EXACTLY ONE WORD in lowercase: independent, support, or opposition.
No explanation, no punctuation."#;

const DETAILED_SYSTEM: &str = "You are an intent classifier. Follow the format exactly.";

/// Confidence reported when the model omits or garbles it
pub const DEFAULT_CONFIDENCE: f32 = 0.8;

/// Prompts for the intent classifier
pub struct ClassifierPrompt;

impl ClassifierPrompt {
    pub fn classify(query: &str, context: &str) -> Vec<ChatMessage> {
        let prefix = if context.trim().is_empty() {
            String::new()
        } else {
            format!("Previous context:\n{}\n\n", context)
        };
        vec![
            ChatMessage::system(CLASSIFIER_SYSTEM),
            ChatMessage::user(format!("{}Classify this query: {}", prefix, query)),
        ]
    }

    pub fn classify_detailed(query: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(DETAILED_SYSTEM),
            ChatMessage::user(format!(
                r#"Classify this query and provide reasoning:

Query: "{}"

Provide your response in this exact format:
MODE: [independent/support/opposition]
CONFIDENCE: [0.0-1.0]
REASONING: [brief explanation]"#,
                query
            )),
        ]
    }
}

/// Parse a `MODE:` / `CONFIDENCE:` / `REASONING:` response.
///
/// Lenient: missing or malformed lines keep their defaults, and an
/// unrecognised mode becomes `independent`.
pub fn parse_classification_detail(response: &str) -> ClassificationDetail {
    let mut mode = CollaborationMode::default();
    let mut confidence = DEFAULT_CONFIDENCE;
    let mut reasoning = "Default classification".to_string();

    for line in response.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix("MODE:") {
            mode = value.parse().unwrap_or_default();
        } else if let Some(value) = line.strip_prefix("CONFIDENCE:") {
            confidence = value.trim().parse().unwrap_or(DEFAULT_CONFIDENCE);
        } else if let Some(value) = line.strip_prefix("REASONING:") {
            reasoning = value.trim().to_string();
        }
    }

    ClassificationDetail::new(mode, confidence, reasoning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prompt_includes_context() {
        let messages = ClassifierPrompt::classify("Is the moon fake?", "Asha: hi");
        assert!(messages[1].content.starts_with("Previous context:\nAsha: hi"));
        assert!(messages[1].content.ends_with("Classify this query: Is the moon fake?"));
    }

    #[test]
    fn test_classify_prompt_without_context() {
        let messages = ClassifierPrompt::classify("Compare A vs B", "");
        assert_eq!(messages[1].content, "Classify this query: Compare A vs B");
    }

    #[test]
    fn test_parse_full_detail() {
        let detail = parse_classification_detail(
            "MODE: opposition\nCONFIDENCE: 0.93\nREASONING: asks to fact-check a claim",
        );
        assert_eq!(detail.mode, CollaborationMode::Opposition);
        assert!((detail.confidence - 0.93).abs() < f32::EPSILON);
        assert_eq!(detail.reasoning, "asks to fact-check a claim");
    }

    #[test]
    fn test_parse_defaults_on_garbage() {
        let detail = parse_classification_detail("MODE: banana\nCONFIDENCE: high");
        assert_eq!(detail.mode, CollaborationMode::Independent);
        assert_eq!(detail.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(detail.reasoning, "Default classification");
    }

    #[test]
    fn test_parse_keeps_colons_in_reasoning() {
        let detail = parse_classification_detail("MODE: support\nREASONING: how-to: explain");
        assert_eq!(detail.mode, CollaborationMode::Support);
        assert_eq!(detail.reasoning, "how-to: explain");
    }
}
