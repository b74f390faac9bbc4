//! Opposition protocol: adversarial debate
//!
//! Driven by [`DebateMachine`]: the generator answers once, then each round
//! the critic challenges the current answer and the referee judges. A
//! referee verdict ends the debate; otherwise the generator revises and the
//! next round starts, up to the round limit.

use super::{CollaborationProtocol, ProtocolInput};
use crate::services::completion_client::CompletionError;
use async_trait::async_trait;
use chorus_domain::{
    AgentRole, CollaborationMode, DebateMachine, DebateOutcome, DebateStep, PromptTemplate, Turn,
    TurnKind,
};
use tracing::{debug, info};

const MODE: CollaborationMode = CollaborationMode::Opposition;

pub struct OppositionProtocol {
    max_rounds: u32,
}

impl OppositionProtocol {
    pub fn new(max_rounds: u32) -> Self {
        Self { max_rounds }
    }
}

impl Default for OppositionProtocol {
    fn default() -> Self {
        Self::new(chorus_domain::MAX_DEBATE_ROUNDS)
    }
}

#[async_trait]
impl CollaborationProtocol for OppositionProtocol {
    fn mode(&self) -> CollaborationMode {
        MODE
    }

    async fn run(&self, input: &ProtocolInput<'_>) -> Result<Vec<Turn>, CompletionError> {
        let ProtocolInput {
            client,
            query,
            context,
            ..
        } = *input;
        let mut machine = DebateMachine::new(self.max_rounds);
        let mut turns = Vec::with_capacity(machine.max_turns());

        // Current generator answer and the latest critique
        let mut answer = String::new();
        let mut critique = String::new();

        while !machine.is_done() {
            let step = machine.step();
            debug!("Debate step: {:?}", step);

            let turn = match step {
                DebateStep::Generate => {
                    answer = client
                        .complete(
                            AgentRole::Agent1,
                            PromptTemplate::debate_generator(query, context),
                            0.7,
                            120,
                        )
                        .await?;
                    Turn::new(TurnKind::Generator, AgentRole::Agent1, MODE, answer.clone())
                }
                DebateStep::Critique { round } => {
                    info!("Debate round {}", round);
                    critique = client
                        .complete(
                            AgentRole::Agent2,
                            PromptTemplate::debate_critic(query, &answer, context),
                            0.4,
                            90,
                        )
                        .await?;
                    Turn::in_round(TurnKind::Critique, AgentRole::Agent2, MODE, round, critique.clone())
                }
                DebateStep::Referee { round } => {
                    let verdict = client
                        .complete(
                            AgentRole::Agent3,
                            PromptTemplate::debate_referee(query, &answer, &critique, context),
                            0.3,
                            110,
                        )
                        .await?;
                    Turn::in_round(TurnKind::Verdict, AgentRole::Agent3, MODE, round, verdict)
                }
                DebateStep::Update { round } => {
                    let feedback = turns.last().map(Turn::text).unwrap_or_default();
                    answer = client
                        .complete(
                            AgentRole::Agent1,
                            PromptTemplate::debate_update(query, feedback, context),
                            0.6,
                            100,
                        )
                        .await?;
                    Turn::in_round(TurnKind::Update, AgentRole::Agent1, MODE, round, answer.clone())
                }
                DebateStep::Done => break,
            };

            machine.advance(turn.text());
            input.push(&mut turns, turn);
        }

        match machine.outcome() {
            Some(DebateOutcome::Verdict { round }) => info!("Verdict reached in round {}", round),
            Some(DebateOutcome::RoundLimit { rounds }) => {
                info!("Debate ended at the round limit ({} rounds)", rounds)
            }
            None => {}
        }

        Ok(turns)
    }
}
