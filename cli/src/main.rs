//! CLI entrypoint for chorus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chorus_application::{
    CompletionBackend, CompletionClient, ConversationLogger, IntentClassifier, ProgressNotifier,
    RunConsensusInput, RunConsensusUseCase,
};
use chorus_domain::{AgentRole, ContextEntry, OutputFormat, Query};
use chorus_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, RoutingBackend};
use chorus_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file {} has no file name", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| format!("  - {}", i.message))
        .collect();
    if !errors.is_empty() {
        bail!("invalid configuration:\n{}", errors.join("\n"));
    }

    Ok(config)
}

/// Read prior conversation entries from a JSON array
fn load_history(path: &Path) -> Result<Vec<ContextEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("history file {} is not a JSON array of entries", path.display()))
}

/// Probe every role once and print the outcome
async fn check_connections(client: &CompletionClient, config: &FileConfig) -> bool {
    let mut all_ok = true;
    for role in AgentRole::ALL {
        let name = config.display_name(role.as_str()).unwrap_or_default();
        let profile = client
            .profiles()
            .get(role)
            .map(|p| p.to_string())
            .unwrap_or_default();
        if client.check_connection(role).await {
            println!("{} {} {} [{}]", "v".green(), role.label(), name, profile);
        } else {
            println!("{} {} {} [{}]", "x".red(), role.label(), name, profile);
            all_ok = false;
        }
    }
    all_ok
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting chorus");

    // === Dependency Injection ===
    let backend: Arc<dyn CompletionBackend> = Arc::new(
        RoutingBackend::from_config(&config.backends).context("failed to set up backends")?,
    );
    let retry = config.retry_policy();
    let (profiles, _) = config.profile_table();
    let client = Arc::new(
        CompletionClient::new(Arc::clone(&backend), profiles).with_retry_policy(retry.clone()),
    );

    if cli.check {
        if check_connections(&client, &config).await {
            return Ok(());
        }
        bail!("one or more models did not respond");
    }

    let classifier = IntentClassifier::new(Arc::clone(&backend), config.classifier_profile())
        .with_timeout(retry.request_timeout);

    if cli.explain_mode {
        let Some(text) = cli.query.as_deref() else {
            bail!("--explain-mode needs a query");
        };
        let query = Query::try_new(text)?;
        let detail = classifier.classify_detailed(query.text()).await;
        let format = config
            .output
            .format_for(cli.output.map(OutputFormat::from), false);
        println!("{}", ConsoleFormatter::format_mode_explanation(&detail, format));
        return Ok(());
    }

    let mut use_case = RunConsensusUseCase::new(Arc::clone(&client), classifier)?
        .with_params(config.orchestration_params());
    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing conversation log to {}", logger.path().display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                use_case = use_case.with_conversation_logger(logger);
            }
            None => warn!("Conversation log disabled"),
        }
    }

    let history = match &cli.history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };
    let mode = cli.mode.map(Into::into);

    // Chat mode
    if cli.chat {
        let output = config
            .output
            .format_for(cli.output.map(OutputFormat::from), true);
        let mut repl = ChatRepl::new(Arc::new(use_case))
            .with_progress(!cli.quiet)
            .with_mode(mode)
            .with_output(output)
            .with_history(history);

        repl.run().await?;
        return Ok(());
    }

    // Single query mode - query is required
    let Some(text) = cli.query.as_deref() else {
        bail!("Query is required. Use --chat for interactive mode.");
    };
    let query = Query::try_new(text)?.with_history(history);
    let input = RunConsensusInput::new(query).with_mode(mode);

    let result = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress: Box<dyn ProgressNotifier> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        use_case.execute_with_progress(input, progress.as_ref()).await?
    };

    let format = config
        .output
        .format_for(cli.output.map(OutputFormat::from), false);
    println!("{}", ConsoleFormatter::render(&result, text, format));

    Ok(())
}
