use anyhow::Context;
use breathewatch::config::file::StoreKind;
use breathewatch::utils::{logger, validation::Validate};
use breathewatch::{
    AirQualityStore, CliConfig, Command, ComparisonEngine, ConfigProvider, FileConfig, HttpStore,
    JsonFileStore, LocationDirectory,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting breathewatch");

    if let Err(e) = cli.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let command = cli.command.clone();

    match cli.config.clone() {
        Some(path) => {
            let config = FileConfig::from_file(&path)
                .with_context(|| format!("failed to read configuration file {}", path))?;
            if let Err(e) = config.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("{}", e);
                std::process::exit(1);
            }

            let store: Arc<dyn AirQualityStore> = match config.store.kind {
                StoreKind::Json => {
                    let path = config.store.data_path.as_deref().unwrap_or_default();
                    Arc::new(JsonFileStore::load(path).with_context(|| {
                        format!("failed to load air quality records from {}", path)
                    })?)
                }
                StoreKind::Http => {
                    let endpoint = config.store.endpoint.as_deref().unwrap_or_default();
                    Arc::new(HttpStore::new(endpoint, config.timeout_seconds())?)
                }
            };

            run(config, store, command).await
        }
        None => {
            let store: Arc<dyn AirQualityStore> = if let Some(endpoint) = &cli.endpoint {
                Arc::new(HttpStore::new(endpoint, cli.timeout_secs)?)
            } else {
                let path = cli.data.as_deref().unwrap_or_default();
                Arc::new(JsonFileStore::load(path).with_context(|| {
                    format!("failed to load air quality records from {}", path)
                })?)
            };

            run(cli, store, command).await
        }
    }
}

async fn run<C: ConfigProvider>(
    config: C,
    store: Arc<dyn AirQualityStore>,
    command: Command,
) -> anyhow::Result<()> {
    // startup precondition: no directory, no service
    let directory = LocationDirectory::load(config.geojson_path()).with_context(|| {
        format!(
            "failed to load neighborhood directory from {}",
            config.geojson_path()
        )
    })?;
    tracing::info!("Loaded {} neighborhoods", directory.len());

    let engine = ComparisonEngine::new(Arc::new(directory), store, config);

    let output = match command {
        Command::Resolve { name, partial } => {
            let record = if partial {
                engine.directory().resolve_partial(&name)?
            } else {
                engine.directory().resolve(&name)?
            };
            serde_json::to_string_pretty(&record)?
        }
        Command::Score { name } => {
            let score = engine.score(&name).await?;
            serde_json::to_string_pretty(&score)?
        }
        Command::Compare { names } => {
            let results = engine.compare(&names).await?;
            let failures = results.iter().filter(|r| !r.success).count();
            if failures > 0 {
                tracing::warn!("{} of {} lookups failed", failures, results.len());
            }
            serde_json::to_string_pretty(&results)?
        }
    };

    println!("{}", output);
    Ok(())
}
