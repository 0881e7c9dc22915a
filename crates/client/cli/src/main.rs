//! Headless encounter runner.
//!
//! Loads content, lets both sides autoplay and prints what happens, either as
//! narration or as one JSON event per line.
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_core::{InitiativeOrder, LoggedEvent, Outcome, Side};
use combat_runtime::{Encounter, FirstAvailableProvider, Narrator, StepOutcome};
use config::{CliConfig, OutputFormat};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    run(&config)
}

fn run(config: &CliConfig) -> Result<()> {
    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::embedded(),
    };
    tracing::info!(content_dir = ?factory.data_dir(), "loading content");

    let combat_config = factory.load_config().context("loading combat config")?;
    let items = factory.load_items().context("loading item catalog")?;
    let roster = factory.load_roster().context("loading roster")?;

    let mut builder = Encounter::builder(roster.participants)
        .consumables(roster.consumables)
        .items(Arc::new(items))
        .config(combat_config)
        .provider(Side::Ally, FirstAvailableProvider)
        .provider(Side::Enemy, FirstAvailableProvider);
    if config.initiative {
        builder = builder.turn_order(InitiativeOrder);
    }
    let mut encounter = builder.build()?;

    let narrator = encounter.narrator()?;
    let opening = encounter
        .handle()
        .read(|session| session.state().log.iter().cloned().collect::<Vec<_>>())?;
    print_events(config.output, &narrator, &opening)?;

    while encounter.turns() < config.max_turns {
        match encounter.step()? {
            StepOutcome::Acted(resolution) => {
                print_events(config.output, &narrator, &resolution.events)?;
                if resolution.outcome.is_some() {
                    break;
                }
            }
            StepOutcome::Over(_) => break,
        }
    }

    if encounter.handle().is_active()? {
        tracing::warn!(max_turns = config.max_turns, "aborting encounter at turn limit");
        encounter.terminate(Outcome::Aborted)?;
        let closing = encounter
            .handle()
            .read(|session| session.state().log.last().cloned())?;
        print_events(config.output, &narrator, closing.as_slice())?;
    }

    let report = encounter
        .report()?
        .context("encounter ended without a report")?;
    if config.output == OutputFormat::Narration {
        println!();
        println!(
            "{} after {} rounds; {} standing, {} fallen",
            report.outcome,
            report.rounds,
            report.survivors.len(),
            report.fallen.len()
        );
    }

    Ok(())
}

fn print_events(format: OutputFormat, narrator: &Narrator, events: &[LoggedEvent]) -> Result<()> {
    for event in events {
        match format {
            OutputFormat::Narration => println!("{}", narrator.narrate(event)),
            OutputFormat::Json => println!("{}", serde_json::to_string(event)?),
        }
    }
    Ok(())
}

/// Setup logging to stderr and, when configured, to a file
fn setup_logging(config: &CliConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let directory = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::path::PathBuf::from("."),
            };
            let file_name = path
                .file_name()
                .context("COMBAT_LOG_FILE has no file name")?;
            std::fs::create_dir_all(&directory)
                .with_context(|| format!("creating log directory {}", directory.display()))?;

            let file_appender = tracing_appender::rolling::never(&directory, file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(path) = &config.log_file {
        tracing::info!("Log file: {}", path.display());
    }

    Ok(guard)
}
