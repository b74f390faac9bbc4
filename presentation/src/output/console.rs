//! Console output formatter for orchestration results

use chorus_domain::{ClassificationDetail, OrchestrationResult, OutputFormat, Turn, TurnKind};
use colored::Colorize;
use serde::Serialize;

/// Stable JSON shape of one turn
#[derive(Serialize)]
struct JsonTurn<'a> {
    speaker: &'a str,
    role: &'a str,
    text: &'a str,
    mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    round: Option<u32>,
}

/// Stable JSON shape of a result
#[derive(Serialize)]
struct JsonResult<'a> {
    mode: &'a str,
    turns: Vec<JsonTurn<'a>>,
    final_answer: &'a str,
}

/// Formats orchestration results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render in the requested format
    pub fn render(result: &OrchestrationResult, query: &str, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result, query),
            OutputFormat::Final => Self::format_final_only(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete result: every turn, then the consensus
    pub fn format(result: &OrchestrationResult, query: &str) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Chorus"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), query));
        output.push_str(&format!(
            "{} {} ({})\n",
            "Mode:".cyan().bold(),
            result.mode,
            result.mode.description()
        ));
        if let Some(rounds) = result.rounds() {
            output.push_str(&format!("{} {}\n", "Rounds:".cyan().bold(), rounds));
        }

        output.push_str(&Self::section_header("Discussion"));
        for turn in &result.turns {
            output.push_str(&Self::format_turn(turn));
        }

        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&format!("\n{}\n", result.final_answer));

        output.push_str(&Self::footer());
        output
    }

    /// One turn with a colored speaker heading
    pub fn format_turn(turn: &Turn) -> String {
        let heading = format!("── {} ──", turn.speaker());
        let heading = match turn.kind() {
            TurnKind::Critique => heading.red().bold(),
            TurnKind::Verdict => heading.green().bold(),
            _ => heading.yellow().bold(),
        };
        format!("\n{}\n{}\n", heading, turn.text())
    }

    /// Format as JSON
    pub fn format_json(result: &OrchestrationResult) -> String {
        let json = JsonResult {
            mode: result.mode.as_str(),
            turns: result
                .turns
                .iter()
                .map(|turn| JsonTurn {
                    speaker: turn.speaker(),
                    role: turn.role().as_str(),
                    text: turn.text(),
                    mode: turn.mode().as_str(),
                    round: turn.round(),
                })
                .collect(),
            final_answer: &result.final_answer,
        };
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    }

    /// Consensus answer only (concise output)
    pub fn format_final_only(result: &OrchestrationResult) -> String {
        format!(
            "{}\n\n{}\n",
            format!("=== Consensus ({}) ===", result.mode).cyan().bold(),
            result.final_answer
        )
    }

    /// Explain which mode a query would get, without running it
    pub fn format_mode_explanation(detail: &ClassificationDetail, format: OutputFormat) -> String {
        if format == OutputFormat::Json {
            return serde_json::to_string_pretty(detail).unwrap_or_else(|_| "{}".to_string());
        }
        format!(
            "{} {}
{} {:.2}
{} {}
",
            "Mode:".cyan().bold(),
            detail.mode,
            "Confidence:".cyan().bold(),
            detail.confidence,
            "Reasoning:".cyan().bold(),
            detail.reasoning
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
