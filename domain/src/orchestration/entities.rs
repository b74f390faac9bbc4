//! Orchestration domain entities

use crate::core::role::AgentRole;
use crate::orchestration::mode::CollaborationMode;
use serde::{Deserialize, Serialize};

/// What a turn contributes within its protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Independent: one of three parallel perspectives
    Answer,
    /// Support: the main answer
    Lead,
    /// Support: incremental nuance on top of the lead
    Supplement,
    /// Support: closing takeaway or caution
    Final,
    /// Opposition: the initial answer
    Generator,
    /// Opposition: critic's rebuttal or agreement
    Critique,
    /// Opposition: referee's verdict
    Verdict,
    /// Opposition: generator's revised answer after referee feedback
    Update,
}

impl TurnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnKind::Answer => "answer",
            TurnKind::Lead => "lead",
            TurnKind::Supplement => "supplement",
            TurnKind::Final => "final",
            TurnKind::Generator => "generator",
            TurnKind::Critique => "critique",
            TurnKind::Verdict => "verdict",
            TurnKind::Update => "update",
        }
    }

    /// Display name shown in the group chat
    pub fn speaker_name(&self, role: AgentRole, round: Option<u32>) -> String {
        let round_suffix = round.map(|r| format!(" Round {}", r)).unwrap_or_default();
        match self {
            TurnKind::Answer => role.label().to_string(),
            TurnKind::Lead => format!("Lead ({})", role.label()),
            TurnKind::Supplement => format!("Supplement ({})", role.label()),
            TurnKind::Final => format!("Final ({})", role.label()),
            TurnKind::Generator => format!("Generator ({})", role.label()),
            TurnKind::Critique => format!("Critic ({}){}", role.label(), round_suffix),
            TurnKind::Verdict => format!("Referee ({}){}", role.label(), round_suffix),
            TurnKind::Update => format!("Generator Update{}", round_suffix),
        }
    }
}

impl std::fmt::Display for TurnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stage of an orchestration run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Intent classification (skipped when the mode is overridden)
    Classification,
    /// The selected collaboration protocol
    Protocol(CollaborationMode),
    /// Consensus synthesis over the transcript
    Synthesis,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Classification => "Classifying intent",
            Stage::Protocol(CollaborationMode::Independent) => "Independent perspectives",
            Stage::Protocol(CollaborationMode::Support) => "Supporting discussion",
            Stage::Protocol(CollaborationMode::Opposition) => "Debate",
            Stage::Synthesis => "Synthesizing consensus",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One produced utterance (Entity)
///
/// Turns are append-only: once produced they are only read, never mutated.
/// The stable [`AgentRole`] travels with the turn so consumers never need
/// to parse the display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    speaker: String,
    role: AgentRole,
    kind: TurnKind,
    text: String,
    mode: CollaborationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    round: Option<u32>,
}

impl Turn {
    /// Create a turn outside any debate round
    pub fn new(
        kind: TurnKind,
        role: AgentRole,
        mode: CollaborationMode,
        text: impl Into<String>,
    ) -> Self {
        Self {
            speaker: kind.speaker_name(role, None),
            role,
            kind,
            text: text.into(),
            mode,
            round: None,
        }
    }

    /// Create a turn tagged with a debate round
    pub fn in_round(
        kind: TurnKind,
        role: AgentRole,
        mode: CollaborationMode,
        round: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            speaker: kind.speaker_name(role, Some(round)),
            role,
            kind,
            text: text.into(),
            mode,
            round: Some(round),
        }
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn kind(&self) -> TurnKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> CollaborationMode {
        self.mode
    }

    pub fn round(&self) -> Option<u32> {
        self.round
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_speaker_name() {
        let turn = Turn::new(
            TurnKind::Answer,
            AgentRole::Agent2,
            CollaborationMode::Independent,
            "hi",
        );
        assert_eq!(turn.speaker(), "Agent 2");
        assert_eq!(turn.round(), None);
    }

    #[test]
    fn test_debate_speaker_names() {
        let mode = CollaborationMode::Opposition;
        let critic = Turn::in_round(TurnKind::Critique, AgentRole::Agent2, mode, 2, "no");
        let referee = Turn::in_round(TurnKind::Verdict, AgentRole::Agent3, mode, 2, "ok");
        let update = Turn::in_round(TurnKind::Update, AgentRole::Agent1, mode, 2, "fixed");
        assert_eq!(critic.speaker(), "Critic (Agent 2) Round 2");
        assert_eq!(referee.speaker(), "Referee (Agent 3) Round 2");
        assert_eq!(update.speaker(), "Generator Update Round 2");
        assert_eq!(
            Turn::new(TurnKind::Generator, AgentRole::Agent1, mode, "x").speaker(),
            "Generator (Agent 1)"
        );
    }

    #[test]
    fn test_turn_serialization_omits_missing_round() {
        let turn = Turn::new(
            TurnKind::Lead,
            AgentRole::Agent1,
            CollaborationMode::Support,
            "answer",
        );
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["speaker"], "Lead (Agent 1)");
        assert_eq!(json["role"], "agent1");
        assert_eq!(json["mode"], "support");
        assert!(json.get("round").is_none());
    }
}
