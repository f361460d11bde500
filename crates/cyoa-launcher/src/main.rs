//! cyoa launcher - resolves the game data and starts the frontend.
//!
//! Fetches the game data from the content API when the host is reachable,
//! falling back to the local store otherwise, and writes the resulting
//! flags to the frontend's mount point.

mod writer;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cyoa_core::{
    ApiClient, Config, ConnectivityProbe, DataResolver, FileStore, FixedConnectivity,
    KeyValueStore, MountPoint, ReachabilityProbe, Resolution,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use writer::{FlagsWriter, STDOUT_MOUNT};

#[derive(Parser, Debug)]
#[command(name = "cyoa", version, about = "Resolve cyoa game data and hand it to the frontend")]
struct Cli {
    /// Game data endpoint, overrides the config file
    #[arg(long, env = "CYOA_API_URI")]
    api_uri: Option<String>,

    /// Skip the network and load from the local store
    #[arg(long)]
    offline: bool,

    /// Run as if no local store were available
    #[arg(long, conflicts_with = "store_dir")]
    no_store: bool,

    /// Directory of the local store, overrides the config file
    #[arg(long, env = "CYOA_STORE_DIR")]
    store_dir: Option<PathBuf>,

    /// Where to write the flags: a file path, or "-" for stdout
    #[arg(long, default_value = STDOUT_MOUNT)]
    mount: String,

    /// Config file to use instead of ~/.config/cyoa/config.json
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
/// Logs go to stderr; stdout is reserved for the flags.
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, guard) = tracing_appender::non_blocking(io::stderr());
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer))
        .with(filter)
        .init();
    guard
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(ref uri) = cli.api_uri {
        config.api_uri = uri.clone();
    }
    if let Some(ref dir) = cli.store_dir {
        config.store_dir = Some(dir.clone());
    }
    Ok(config)
}

/// Open the file store, or report it unavailable
fn open_store(cli: &Cli, config: &Config) -> Option<FileStore> {
    if cli.no_store {
        return None;
    }

    let opened = config.store_dir().and_then(FileStore::open);
    match opened {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, "Local store unavailable");
            None
        }
    }
}

/// Read the online signal once, off the async workers since the
/// reachability check blocks on DNS and TCP connect.
async fn check_connectivity(cli: &Cli, config: &Config) -> Result<FixedConnectivity> {
    if cli.offline {
        return Ok(FixedConnectivity::offline());
    }

    let probe = ReachabilityProbe::for_uri(&config.api_uri, config.connectivity_timeout())?;
    let online = tokio::task::spawn_blocking(move || probe.is_online())
        .await
        .context("Connectivity check panicked")?;
    Ok(FixedConnectivity(online))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();
    info!("cyoa launcher starting");

    let config = load_config(&cli)?;

    let client = ApiClient::with_timeout(&config.api_uri, config.request_timeout())
        .context("Failed to build HTTP client")?;

    let connectivity = check_connectivity(&cli, &config).await?;

    let store = open_store(&cli, &config);
    let store_ref = store.as_ref().map(|s| s as &dyn KeyValueStore);

    let resolver = DataResolver::new(&connectivity, &client, store_ref)
        .with_mount(MountPoint::new(cli.mount.clone()))
        .with_default_outcome_type(config.default_outcome_type.clone());

    let mut writer = FlagsWriter::new();
    let resolution = resolver.resolve(&mut writer).await;

    match resolution {
        Resolution::NotStarted => warn!("Frontend not started: no game data available"),
        _ => info!(
            ?resolution,
            success = writer.written().map(|f| f.success),
            "Frontend started"
        ),
    }

    Ok(())
}
