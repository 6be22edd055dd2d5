//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use roundtable_application::{
    CommandProcessor, CommandSource, NoProgress, NoTranscript, Participant, RoundProgressNotifier,
    RoundScheduler, TextGenerator, TranscriptLogger, command_queue,
};
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, JsonResultStore, JsonlTranscriptLogger, OllamaEmbedder,
    OllamaGenerator, ScenarioConfig, ScriptedCommandSource, UdpCommandSource, VectorMemory,
};
use roundtable_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the subscriber; the returned guard flushes the file log on drop.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "roundtable.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

/// Load file configuration and apply command-line overrides
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(path) = &cli.results {
        config.output.results_path = path.clone();
    }
    if let Some(path) = &cli.transcript {
        config.output.transcript_path = Some(path.clone());
    }
    if let Some(bind) = &cli.listen {
        config.listener.enabled = true;
        config.listener.bind = bind.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let scenario = ScenarioConfig::load(&cli.scenario)
        .with_context(|| format!("Failed to load scenario {}", cli.scenario.display()))?;
    info!(
        "Starting roundtable: {} participants, {} rounds",
        scenario.agents.len(),
        scenario.total_round
    );

    // === Dependency Injection ===
    let timeout = config.llm.timeout_seconds.map(Duration::from_secs);
    let generator: Arc<dyn TextGenerator> = Arc::new(
        OllamaGenerator::new(&config.llm.endpoint, &config.llm.model, timeout)
            .context("Failed to create text generator")?,
    );
    let embedder = Arc::new(
        OllamaEmbedder::new(&config.llm.endpoint, &config.llm.embedding_model, timeout)
            .context("Failed to create embedder")?,
    );

    let transcript: Arc<dyn TranscriptLogger> = match &config.output.transcript_path {
        Some(path) => match JsonlTranscriptLogger::new(path) {
            Some(logger) => {
                info!("Writing transcript to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoTranscript),
        },
        None => Arc::new(NoTranscript),
    };

    // Spinners only make sense on a terminal; piped output gets plain lines.
    let progress: Arc<dyn RoundProgressNotifier> = if cli.quiet {
        Arc::new(NoProgress)
    } else if std::io::stdout().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let voting = config.voting.to_params();
    let mut participants = Vec::with_capacity(scenario.agents.len());
    for (profile, agent) in scenario.profiles().into_iter().zip(&scenario.agents) {
        let mut participant = Participant::new(
            profile,
            Arc::clone(&generator),
            Box::new(VectorMemory::new(Arc::clone(&embedder))),
        )
        .with_recall_limit(voting.recall_limit)
        .with_transcript(Arc::clone(&transcript));

        for memory in &agent.initial_memory {
            participant
                .add_memory(memory)
                .await
                .with_context(|| format!("Failed to seed memories of {}", agent.name))?;
        }
        participants.push(participant);
    }

    let store = Arc::new(JsonResultStore::new(&config.output.results_path));
    let scheduler = RoundScheduler::new(
        participants,
        scenario.original_topic.clone(),
        scenario.environment.clone(),
        scenario.total_round,
        store,
    )?
    .with_params(voting)
    .with_progress(Arc::clone(&progress))
    .with_transcript(Arc::clone(&transcript));

    // === Command sources ===
    let mut sources: Vec<Box<dyn CommandSource>> = Vec::new();
    if let Some(path) = &cli.commands {
        let script = ScriptedCommandSource::from_file(path)
            .with_context(|| format!("Failed to read command script {}", path.display()))?;
        sources.push(Box::new(script));
    }
    if config.listener.enabled {
        let addr = config.listener_addr()?;
        let listener = UdpCommandSource::bind(addr)
            .await
            .with_context(|| format!("Failed to bind UDP listener on {addr}"))?;
        sources.push(Box::new(listener));
    }
    if sources.is_empty() {
        warn!("No command source configured; use --commands or --listen");
    }

    let (queue, receiver) = command_queue();
    let cancel = CancellationToken::new();
    for source in sources {
        let name = source.name().to_string();
        let queue = queue.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            match source.run(queue, cancel).await {
                Ok(()) => info!("Command source '{}' finished", name),
                Err(e) => warn!("Command source '{}' stopped: {}", name, e),
            }
        });
    }
    // Only the sources hold senders now; the queue closes when they finish.
    drop(queue);

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; finishing queued commands");
                cancel.cancel();
            }
        });
    }

    let mut processor = CommandProcessor::new(scheduler, receiver)
        .with_params(config.processor.to_params())
        .with_progress(progress)
        .with_transcript(transcript);
    let report = processor.run().await;
    cancel.cancel();

    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", output);

    Ok(())
}
