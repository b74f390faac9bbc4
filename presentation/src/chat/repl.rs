//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::{ConsoleFormatter, ProgressReporter};
use chorus_application::{RunConsensusInput, RunConsensusUseCase};
use chorus_domain::{
    CollaborationMode, ContextEntry, DEFAULT_HISTORY_LIMIT, OrchestrationResult, OutputFormat,
    Query,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// Speaker label recorded for the consensus answer
const CONSENSUS_SPEAKER: &str = "Consensus";

/// Entries kept in the session; only the trailing context window is ever sent
const SESSION_HISTORY_CAP: usize = DEFAULT_HISTORY_LIMIT * 2;

/// Result of a slash command
#[derive(Debug, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Exit,
}

/// Interactive group chat
///
/// Every exchange (the query, each turn and the consensus) is appended to
/// the running history, so follow-up queries see the conversation. The
/// history is trimmed to its most recent entries after each exchange.
pub struct ChatRepl {
    use_case: Arc<RunConsensusUseCase>,
    mode: Option<CollaborationMode>,
    history: Vec<ContextEntry>,
    output: OutputFormat,
    show_progress: bool,
}

impl ChatRepl {
    pub fn new(use_case: Arc<RunConsensusUseCase>) -> Self {
        Self {
            use_case,
            mode: None,
            history: Vec::new(),
            output: OutputFormat::Full,
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Fix the mode instead of classifying each query
    pub fn with_mode(mut self, mode: Option<CollaborationMode>) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Seed the conversation (e.g. from `--history`)
    pub fn with_history(mut self, history: Vec<ContextEntry>) -> Self {
        self.history = history;
        self.trim_history();
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("chorus").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandOutcome::Exit {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_query(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn mode_label(&self) -> String {
        self.mode
            .map(|m| m.to_string())
            .unwrap_or_else(|| "auto".to_string())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Chorus - Chat Mode             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Mode: {}", self.mode_label());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?          - Show this help");
        println!("  /mode <name|auto>      - Fix the mode or go back to classification");
        println!("  /history               - Show the conversation context");
        println!("  /clear                 - Forget the conversation");
        println!("  /quit, /exit, /q       - Exit chat");
        println!();
    }

    /// Handle slash commands
    fn handle_command(&mut self, cmd: &str) -> CommandOutcome {
        let (name, arg) = match cmd.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (cmd, ""),
        };

        match name {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return CommandOutcome::Exit;
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_help();
            }
            "/mode" => match arg {
                "" => println!("Mode: {}", self.mode_label()),
                "auto" => {
                    self.mode = None;
                    println!("Mode: auto");
                }
                name => match name.parse::<CollaborationMode>() {
                    Ok(mode) => {
                        self.mode = Some(mode);
                        println!("Mode: {} ({})", mode, mode.description());
                    }
                    Err(e) => println!("{}", e),
                },
            },
            "/history" => {
                if self.history.is_empty() {
                    println!("(no conversation yet)");
                } else {
                    for entry in &self.history {
                        println!(
                            "  {}: {}",
                            entry.speaker_label(),
                            chorus_domain::util::preview(&entry.text, 80)
                        );
                    }
                }
            }
            "/clear" => {
                self.history.clear();
                println!("Conversation cleared.");
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        CommandOutcome::Continue
    }

    async fn process_query(&mut self, text: &str) {
        println!();

        let query = match Query::try_new(text) {
            Ok(query) => query.with_history(self.history.clone()),
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };
        let input = RunConsensusInput::new(query).with_mode(self.mode);

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(input, &progress).await
        } else {
            self.use_case.execute(input).await
        };

        match result {
            Ok(result) => {
                println!("{}", ConsoleFormatter::render(&result, text, self.output));
                self.record(text, &result);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }

    fn record(&mut self, text: &str, result: &OrchestrationResult) {
        self.history.push(ContextEntry::new("user", "You", text));
        self.history.extend(
            result
                .turns
                .iter()
                .map(|turn| ContextEntry::new("agent", turn.speaker(), turn.text())),
        );
        self.history.push(ContextEntry::new(
            "assistant",
            CONSENSUS_SPEAKER,
            result.final_answer.as_str(),
        ));
        self.trim_history();
    }

    fn trim_history(&mut self) {
        let excess = self.history.len().saturating_sub(SESSION_HISTORY_CAP);
        self.history.drain(..excess);
    }
}
