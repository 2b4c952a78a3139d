//! Command-line entry point: pulls Crunchyroll watch history, reconciles it
//! into per-season progress and prints the result as JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anisync_api::crunchyroll::auth::ClientCredentials;
use anisync_api::crunchyroll::CrunchyrollClient;
use anisync_core::config::AppConfig;
use anisync_core::error::SyncError;
use anisync_core::models::SeriesAggregate;
use anisync_core::reconcile;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "anisync")]
#[command(about = "Reconcile Crunchyroll watch history into per-season progress")]
#[command(version)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Crunchyroll account email, overriding the config file
    #[arg(long, env = "ANISYNC_CR_EMAIL")]
    email: Option<String>,

    /// Crunchyroll account password, overriding the config file
    #[arg(long, env = "ANISYNC_CR_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            init_tracing("anisync=info");
            error!(error = %e, "Could not load config");
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        config.general.log_filter = "anisync=debug".into();
    }
    init_tracing(&config.general.log_filter);

    if let Some(email) = args.email {
        config.crunchyroll.email = Some(email);
    }
    if let Some(password) = args.password {
        config.crunchyroll.password = Some(password);
    }

    let result = tokio::select! {
        result = run(&config) => result,
        _ = tokio::signal::ctrl_c() => {
            error!("Interrupted, discarding partial results");
            return ExitCode::FAILURE;
        }
    };

    match result.and_then(|watched| print_json(watched.as_deref(), args.pretty)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Reconciliation failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(config: &AppConfig) -> Result<Option<Vec<SeriesAggregate>>, SyncError> {
    let cr = &config.crunchyroll;
    if !cr.enabled {
        info!("Crunchyroll source disabled, nothing to reconcile");
        return Ok(None);
    }

    let (email, password) = cr.login()?;
    let client = CrunchyrollClient::new(
        email.to_string(),
        password.to_string(),
        ClientCredentials {
            client_id: cr.client_id.clone(),
            client_secret: cr.client_secret.clone(),
        },
        cr.locale.clone(),
    );

    let watched = reconcile::fetch_watched_series(&client).await?;
    if let Some(series) = &watched {
        let episodes: u32 = series.iter().map(|s| s.total_watched_episodes()).sum();
        info!(series = series.len(), episodes, "Reconciled watch history");
    }
    Ok(watched)
}

fn print_json(watched: Option<&[SeriesAggregate]>, pretty: bool) -> Result<(), SyncError> {
    let out = if pretty {
        serde_json::to_string_pretty(&watched)
    } else {
        serde_json::to_string(&watched)
    }
    .map_err(|e| SyncError::Io(e.into()))?;
    println!("{out}");
    Ok(())
}
