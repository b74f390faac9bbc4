//! Orchestration value objects - immutable result types.
//!
//! - [`Classification`] - the resolved mode and where it came from
//! - [`ClassificationDetail`] - mode with confidence and reasoning
//! - [`OrchestrationResult`] - the complete result handed to the delivery layer

use crate::orchestration::entities::Turn;
use crate::orchestration::mode::CollaborationMode;
use serde::{Deserialize, Serialize};

/// Why a mode was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "detail")]
pub enum ModeSource {
    /// Caller supplied the mode; classification was skipped
    Override,
    /// The classifier returned a valid label
    Classifier,
    /// The classifier failed; the default mode was used
    Fallback(String),
}

/// Outcome of intent classification (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub mode: CollaborationMode,
    pub source: ModeSource,
}

impl Classification {
    pub fn classified(mode: CollaborationMode) -> Self {
        Self {
            mode,
            source: ModeSource::Classifier,
        }
    }

    pub fn overridden(mode: CollaborationMode) -> Self {
        Self {
            mode,
            source: ModeSource::Override,
        }
    }

    /// Fall back to the default mode, recording the reason
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            mode: CollaborationMode::default(),
            source: ModeSource::Fallback(reason.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ModeSource::Fallback(_))
    }
}

/// Classification with a self-reported confidence and rationale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationDetail {
    pub mode: CollaborationMode,
    /// Confidence in `[0.0, 1.0]`
    pub confidence: f32,
    pub reasoning: String,
}

impl ClassificationDetail {
    pub fn new(mode: CollaborationMode, confidence: f32, reasoning: impl Into<String>) -> Self {
        Self {
            mode,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
        }
    }
}

/// Complete result of one orchestration (Value Object)
///
/// This is the stable contract consumed by the delivery/persistence layer.
/// Turn order is the production order of the protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub mode: CollaborationMode,
    pub turns: Vec<Turn>,
    pub final_answer: String,
}

impl OrchestrationResult {
    pub fn new(mode: CollaborationMode, turns: Vec<Turn>, final_answer: impl Into<String>) -> Self {
        Self {
            mode,
            turns,
            final_answer: final_answer.into(),
        }
    }

    /// Highest debate round reached, if any turn carries one
    pub fn rounds(&self) -> Option<u32> {
        self.turns.iter().filter_map(Turn::round).max()
    }
}
