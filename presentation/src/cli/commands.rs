//! CLI command definitions

use chorus_domain::{CollaborationMode, OutputFormat};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for orchestration results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Every turn, then the consensus answer
    Full,
    /// Only the consensus answer
    Final,
    /// The result as JSON
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Full => OutputFormat::Full,
            OutputArg::Final => OutputFormat::Final,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Collaboration mode override
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Three parallel perspectives
    Independent,
    /// Lead, supplement, final takeaway
    Support,
    /// Generator, critic and referee debate
    Opposition,
}

impl From<ModeArg> for CollaborationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Independent => CollaborationMode::Independent,
            ModeArg::Support => CollaborationMode::Support,
            ModeArg::Opposition => CollaborationMode::Opposition,
        }
    }
}

/// CLI arguments for chorus
#[derive(Parser, Debug)]
#[command(name = "chorus")]
#[command(author, version, about = "Multi-agent group chat - three models discuss, debate and agree")]
#[command(long_about = r#"
Chorus routes each query to one of three collaboration modes and lets three
models answer together before a final consensus answer is synthesized.

Modes:
  independent  Three parallel perspectives (comparisons, alternatives)
  support      Lead answer, supplement, final takeaway (explanations, how-to)
  opposition   Generator vs critic with a referee (fact-checks, debates)

Without --mode the query is classified automatically.

Configuration files are loaded from (in priority order):
1. CHORUS_* environment variables (e.g. CHORUS_AGENTS__AGENT1__MODEL)
2. --config <path>     Explicit config file
3. ./chorus.toml       Project-level config
4. ~/.config/chorus/config.toml   Global config

Example:
  chorus "Compare React and Vue for a small team"
  chorus --mode opposition "Is it true that coffee stunts growth?"
  chorus --history chat.json -o full "And what about turbofans?"
  chorus --explain-mode "Debate: should AI be regulated?"
  chorus --chat
"#)]
pub struct Cli {
    /// The query to send (not required in chat mode)
    pub query: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Skip classification and use this mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// JSON file with prior conversation entries ({role, speaker, text})
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Output format (defaults to the configured format, then `final`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Check that every configured model responds, then exit
    #[arg(long)]
    pub check: bool,

    /// Show the mode the classifier would pick (with confidence and reasoning), then exit
    #[arg(long, conflicts_with_all = ["chat", "mode"])]
    pub explain_mode: bool,
}
