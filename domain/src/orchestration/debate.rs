//! Debate state machine for the Opposition protocol
//!
//! ```text
//! Generate → { Critique(r) → Referee(r) → (Done | Update(r)) }* → Done
//! ```
//!
//! The round counter runs from 1 to at most [`MAX_DEBATE_ROUNDS`]. The
//! machine only decides *what comes next*; producing the text for each
//! step is the caller's job.

use serde::{Deserialize, Serialize};

/// Hard upper bound on debate rounds
pub const MAX_DEBATE_ROUNDS: u32 = 5;

/// Phrase a referee emits when the debate is settled (matched case-insensitively)
pub const VERDICT_PHRASE: &str = "verdict reached";

/// Whether a referee's text signals that the debate is settled.
///
/// This is a plain substring match on generated text. It is a fragile
/// signal, kept exactly as the protocol defines it.
pub fn is_verdict_reached(referee_text: &str) -> bool {
    referee_text.to_lowercase().contains(VERDICT_PHRASE)
}

/// The step the debate is about to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebateStep {
    Generate,
    Critique { round: u32 },
    Referee { round: u32 },
    Update { round: u32 },
    Done,
}

/// How a finished debate ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebateOutcome {
    /// The referee signalled a verdict in this round
    Verdict { round: u32 },
    /// The round limit was exhausted without a verdict
    RoundLimit { rounds: u32 },
}

/// Drives the Opposition protocol one step at a time
#[derive(Debug, Clone)]
pub struct DebateMachine {
    max_rounds: u32,
    step: DebateStep,
    outcome: Option<DebateOutcome>,
}

impl Default for DebateMachine {
    fn default() -> Self {
        Self::new(MAX_DEBATE_ROUNDS)
    }
}

impl DebateMachine {
    /// Create a machine bounded to `max_rounds`, clamped to `1..=MAX_DEBATE_ROUNDS`
    pub fn new(max_rounds: u32) -> Self {
        Self {
            max_rounds: max_rounds.clamp(1, MAX_DEBATE_ROUNDS),
            step: DebateStep::Generate,
            outcome: None,
        }
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn step(&self) -> DebateStep {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.step == DebateStep::Done
    }

    pub fn outcome(&self) -> Option<DebateOutcome> {
        self.outcome
    }

    /// Record the output of the current step and move to the next one.
    ///
    /// Only a referee's output influences the transition; other outputs are
    /// accepted for symmetry. Advancing a finished machine is a no-op.
    pub fn advance(&mut self, output: &str) -> DebateStep {
        self.step = match self.step {
            DebateStep::Generate => DebateStep::Critique { round: 1 },
            DebateStep::Critique { round } => DebateStep::Referee { round },
            DebateStep::Referee { round } => {
                if is_verdict_reached(output) {
                    self.outcome = Some(DebateOutcome::Verdict { round });
                    DebateStep::Done
                } else {
                    DebateStep::Update { round }
                }
            }
            DebateStep::Update { round } => {
                if round < self.max_rounds {
                    DebateStep::Critique { round: round + 1 }
                } else {
                    self.outcome = Some(DebateOutcome::RoundLimit { rounds: round });
                    DebateStep::Done
                }
            }
            DebateStep::Done => DebateStep::Done,
        };
        self.step
    }

    /// Upper bound on the number of turns a debate can produce
    pub fn max_turns(&self) -> usize {
        1 + 3 * self.max_rounds as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(machine: &mut DebateMachine, referee_says: impl Fn(u32) -> &'static str) -> usize {
        let mut steps = 0;
        while !machine.is_done() {
            let output = match machine.step() {
                DebateStep::Referee { round } => referee_says(round),
                _ => "text",
            };
            machine.advance(output);
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_verdict_phrase_is_case_insensitive() {
        assert!(is_verdict_reached("VERDICT REACHED: agent 1 wins"));
        assert!(is_verdict_reached("Verdict Reached: Agent 1 correct"));
        assert!(is_verdict_reached("ok... verdict reached."));
        assert!(!is_verdict_reached("no verdict yet"));
        assert!(!is_verdict_reached("verdict-reached"));
    }

    #[test]
    fn test_immediate_verdict_is_three_steps() {
        let mut machine = DebateMachine::default();
        let steps = run(&mut machine, |_| "VERDICT REACHED");
        assert_eq!(steps, 3);
        assert_eq!(machine.outcome(), Some(DebateOutcome::Verdict { round: 1 }));
    }

    #[test]
    fn test_round_limit_produces_sixteen_steps() {
        let mut machine = DebateMachine::default();
        let steps = run(&mut machine, |_| "keep going");
        assert_eq!(steps, 16);
        assert_eq!(steps, machine.max_turns());
        assert_eq!(
            machine.outcome(),
            Some(DebateOutcome::RoundLimit { rounds: 5 })
        );
    }

    #[test]
    fn test_verdict_in_third_round() {
        let mut machine = DebateMachine::default();
        let steps = run(&mut machine, |round| {
            if round == 3 { "Verdict reached" } else { "not yet" }
        });
        // generator + 2 full rounds + critic/referee of round 3
        assert_eq!(steps, 1 + 3 * 2 + 2);
        assert_eq!(machine.outcome(), Some(DebateOutcome::Verdict { round: 3 }));
    }

    #[test]
    fn test_max_rounds_is_clamped() {
        assert_eq!(DebateMachine::new(50).max_rounds(), MAX_DEBATE_ROUNDS);
        assert_eq!(DebateMachine::new(0).max_rounds(), 1);
    }

    #[test]
    fn test_transition_sequence() {
        let mut machine = DebateMachine::new(2);
        assert_eq!(machine.step(), DebateStep::Generate);
        assert_eq!(machine.advance("g"), DebateStep::Critique { round: 1 });
        assert_eq!(machine.advance("c"), DebateStep::Referee { round: 1 });
        assert_eq!(machine.advance("r"), DebateStep::Update { round: 1 });
        assert_eq!(machine.advance("u"), DebateStep::Critique { round: 2 });
        assert_eq!(machine.advance("c"), DebateStep::Referee { round: 2 });
        assert_eq!(machine.advance("r"), DebateStep::Update { round: 2 });
        assert_eq!(machine.advance("u"), DebateStep::Done);
        assert_eq!(machine.advance("ignored"), DebateStep::Done);
    }
}
