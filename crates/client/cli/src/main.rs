//! Headless encounter driver.
//!
//! Loads content, plays one scripted scenario and prints the run report as
//! JSON on stdout. Logs go to stderr and optionally to a file.
mod config;

use std::path::Path;

use anyhow::{Context, Result};
use config::CliConfig;
use lantern_content::{ContentFactory, Scenario};
use lantern_core::BossConfig;
use lantern_runtime::Simulation;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let mut config = CliConfig::from_env();
    if let Some(scenario) = std::env::args().nth(1) {
        config.scenario = scenario;
    }

    let _guard = setup_logging(config.log_dir.as_deref())?;

    let (boss_config, mut scenario) = load_content(&config)?;
    if let Some(seed) = config.seed {
        scenario.seed = seed;
    }

    let report = Simulation::new(boss_config)
        .run(&scenario)
        .with_context(|| format!("scenario '{}' failed", scenario.name))?;
    println!("{}", report.to_json_pretty()?);

    Ok(())
}

/// Loads the boss config and the requested scenario, from disk when a data
/// directory is configured and from the embedded content otherwise.
fn load_content(config: &CliConfig) -> Result<(BossConfig, Scenario)> {
    match &config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            tracing::info!(data_dir = %dir.display(), "loading content from disk");
            Ok((
                factory.load_config()?,
                factory.load_scenario(&config.scenario)?,
            ))
        }
        None => {
            tracing::info!("using embedded content");
            Ok((
                ContentFactory::embedded_config()?,
                ContentFactory::embedded_scenario(&config.scenario)?,
            ))
        }
    }
}

/// Setup logging to stderr and, when a directory is given, to a file.
///
/// The returned guard flushes the file writer when dropped.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "lantern.log");
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

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/lantern.log", dir.display());
    }

    Ok(guard)
}
