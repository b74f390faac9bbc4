//! Prompt templates for the collaboration protocols and synthesis

use crate::core::message::ChatMessage;
use crate::core::role::AgentRole;

const INDEPENDENT_RULES: &str = r#"You are an AI agent inside a group chat.
Other AI agents are answering the same user query at the same time.

Rules:
- Keep your reply short (3-4 lines) unless the user asks for more.
- No essays, tables or long bullet lists unless the user asks for them.
- Give only your own perspective.
- Sound natural, like a helpful assistant in a chat."#;

const SUPPORT_RULES: &str = r#"You are inside a group chat with other AI agents.

Rules:
- Replies must be short (2-3 lines) unless the user asks for more.
- No essays or tables unless the user asks for them.
- Do NOT repeat what others already said.
- Add only 1-3 useful new points."#;

const OPPOSITION_RULES: &str = r#"You are inside a group chat with other AI agents.

Rules:
- Replies must be SHORT (2-3 lines) unless the user asks for more.
- No essays, no markdown tables.
- One key point per message.
- Speak naturally, like an assistant in a group.
- If conversation context is provided, use it to give more relevant answers."#;

const SYNTHESIS_SYSTEM: &str =
    "You are a synthesis expert. Combine multiple perspectives into one coherent answer.";

/// Templates for every prompt the protocols send
pub struct PromptTemplate;

impl PromptTemplate {
    fn context_block(context: &str) -> String {
        if context.trim().is_empty() {
            String::new()
        } else {
            format!("Previous conversation context:\n{}\n\n", context)
        }
    }

    fn with_context(context: &str, body: &str) -> String {
        format!("{}{}", Self::context_block(context), body)
    }

    // ==================== Independent ====================

    /// Role-specific instruction for the parallel perspectives
    pub fn independent_instruction(role: AgentRole) -> &'static str {
        match role {
            AgentRole::Agent1 => "Role: Agent 1. Give the first helpful answer.",
            AgentRole::Agent2 => "Role: Agent 2. Give a different angle or nuance.",
            AgentRole::Agent3 => "Role: Agent 3. Add a perspective others may miss.",
        }
    }

    pub fn independent(role: AgentRole, query: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                "{}\n\n{}",
                INDEPENDENT_RULES,
                Self::independent_instruction(role)
            )),
            ChatMessage::user(Self::with_context(context, query)),
        ]
    }

    // ==================== Support ====================

    pub fn support_lead(query: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                "{}\n\nRole: Agent 1. Give the main answer briefly.",
                SUPPORT_RULES
            )),
            ChatMessage::user(Self::with_context(context, query)),
        ]
    }

    pub fn support_supplement(query: &str, lead: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                "{}\n\nRole: Agent 2. Add extra helpful nuance.",
                SUPPORT_RULES
            )),
            ChatMessage::user(Self::with_context(
                context,
                &format!(
                    "User query: {}\n\nAgent 1 said:\n{}\n\nAdd 1-2 extra points (no repetition).",
                    query, lead
                ),
            )),
        ]
    }

    pub fn support_final(query: &str, previous: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                "{}\n\nRole: Agent 3. Give a final practical takeaway or caution.",
                SUPPORT_RULES
            )),
            ChatMessage::user(Self::with_context(
                context,
                &format!(
                    "User query: {}\n\nSo far agents said:\n{}\n\nAdd a final useful takeaway (short).",
                    query, previous
                ),
            )),
        ]
    }

    // ==================== Opposition ====================

    pub fn debate_generator(query: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                "{}\n\nRole: Agent 1 (Generator). Give an initial short answer.",
                OPPOSITION_RULES
            )),
            ChatMessage::user(Self::with_context(context, query)),
        ]
    }

    pub fn debate_critic(query: &str, generator_text: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                "{}\n\nRole: Agent 2 (Critic). Challenge or correct Agent 1 briefly.",
                OPPOSITION_RULES
            )),
            ChatMessage::user(Self::with_context(
                context,
                &format!(
                    "User query: {}\n\nAgent 1 said:\n{}\n\nReply with a short correction or disagreement.",
                    query, generator_text
                ),
            )),
        ]
    }

    pub fn debate_referee(
        query: &str,
        generator_text: &str,
        critic_text: &str,
        context: &str,
    ) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                r#"{}

Role: Agent 3 (Referee).
Your job:
- Decide who is more accurate
- Remove hallucinations
- Give a short verified verdict
If the debate is settled, say: VERDICT REACHED"#,
                OPPOSITION_RULES
            )),
            ChatMessage::user(Self::with_context(
                context,
                &format!(
                    "User query: {}\n\nAgent 1 answer:\n{}\n\nAgent 2 critique:\n{}\n\nGive a short referee verdict.",
                    query, generator_text, critic_text
                ),
            )),
        ]
    }

    pub fn debate_update(query: &str, referee_text: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                "{}\n\nRole: Agent 1. Update your answer based on the referee.",
                OPPOSITION_RULES
            )),
            ChatMessage::user(Self::with_context(
                context,
                &format!(
                    "User query: {}\n\nReferee feedback:\n{}\n\nNow rewrite your answer in 2-3 lines.",
                    query, referee_text
                ),
            )),
        ]
    }

    // ==================== Synthesis ====================

    /// Consensus prompt over the full transcript, in produced order.
    ///
    /// `transcript` holds `(speaker, text)` pairs.
    pub fn synthesis(query: &str, transcript: &[(String, String)], context: &str) -> Vec<ChatMessage> {
        let responses = transcript
            .iter()
            .map(|(speaker, text)| format!("{}: {}", speaker, text))
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = format!(
            r#"{}User Query: {}

Agent Responses:
{}

You are the final assistant in a group chat.

Task:
- Summarize the key takeaway from the agent discussion.
- Mention whether any correction or debate happened.
- Give ONE short final answer unless a longer one is asked for.
- Consider the previous conversation context if available.

Rules:
- At most 4 lines unless asked for more.
- Use headings and light formatting.

Be concise. Synthesize a final consensus answer:"#,
            Self::context_block(context),
            query,
            responses
        );

        vec![ChatMessage::system(SYNTHESIS_SYSTEM), ChatMessage::user(prompt)]
    }

    // ==================== Connection check ====================

    pub fn connection_check() -> Vec<ChatMessage> {
        vec![ChatMessage::user("Hello")]
    }
}
