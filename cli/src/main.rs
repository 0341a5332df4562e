//! CLI entrypoint for PickFlick
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context as _, Result, anyhow, bail};
use clap::Parser;
use pickflick_application::{EventJournal, HandleEventUseCase, NoEventJournal};
use pickflick_domain::ParticipantId;
use pickflick_infrastructure::{
    ConfigLoader, ConfiguredSessionStore, DailySlateCache, FileConfig, JsonlEventJournal,
    RandomRoomCodes, Severity,
};
use pickflick_presentation::{
    BotDispatcher, Cli, ConsoleBot, ConsoleConfig, OutputConfig, ReplayRunner,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "pickflick.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let log_dir = cli.log_dir.as_deref().or(config.logging.dir.as_deref());
    let _log_guard = init_logging(cli.verbose, log_dir);

    report_config_issues(&config)?;
    OutputConfig {
        color: config.output.color,
    }
    .apply();

    info!("Starting PickFlick");

    // === Dependency Injection ===
    let store = Arc::new(
        ConfiguredSessionStore::open(&config.store).context("Failed to open the session store")?,
    );
    info!("Session store: {}", store.backend());

    let slate = Arc::new(DailySlateCache::new(&config.slate.cache_dir));
    let journal: Arc<dyn EventJournal> = match &config.logging.journal {
        Some(path) => match JsonlEventJournal::open(path) {
            Some(journal) => {
                info!("Event journal: {}", journal.path().display());
                Arc::new(journal)
            }
            None => Arc::new(NoEventJournal),
        },
        None => Arc::new(NoEventJournal),
    };

    let (behavior, _) = config.rooms.to_behavior_config();
    let use_case = HandleEventUseCase::new(store, slate, Arc::new(RandomRoomCodes))
        .with_config(behavior)
        .with_journal(journal);
    let dispatcher = BotDispatcher::new(use_case);

    // Replay mode
    if let Some(path) = &cli.replay {
        let file = File::open(path)
            .with_context(|| format!("Failed to open replay file {}", path.display()))?;
        let summary = ReplayRunner::new(&dispatcher)
            .with_echo(!cli.quiet)
            .run(BufReader::new(file))
            .await?;
        println!(
            "Replayed {} updates: {} events handled, {} failed, {} lines skipped",
            summary.updates, summary.handled, summary.failed, summary.skipped
        );
        dispatcher.shutdown().await?;
        return Ok(());
    }

    // Console mode
    let console = ConsoleConfig {
        no_history: cli.no_history,
        ..Default::default()
    }
    .with_participant(ParticipantId::new(cli.participant));
    let bot = ConsoleBot::new(dispatcher, console);
    bot.run().await?;
    bot.dispatcher().shutdown().await?;

    Ok(())
}

/// Install the tracing subscriber
///
/// The returned guard flushes the file writer when dropped.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
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

/// Print configuration issues; errors abort startup
fn report_config_issues(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => eprintln!("Warning: {}", issue.message),
            Severity::Error => eprintln!("Error: {}", issue.message),
        }
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("Invalid configuration");
    }
    Ok(())
}
