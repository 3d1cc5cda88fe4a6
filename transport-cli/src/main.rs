use std::process::ExitCode;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transport_cli::api::TransportClient;
use transport_cli::config::{AppConfig, env_file_error};
use transport_cli::repl::{Dispatcher, Repl, TerminalInput};
use transport_cli::stations::StationIndex;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // read before the subscriber so RUST_LOG can come from .env
    let env_file = env_file_error(dotenvy::dotenv());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transport_cli=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = env_file {
        warn!(error = %e, "ignoring .env file");
    }

    let config = AppConfig::from_env();
    if config.api_key.is_empty() {
        warn!("API_KEY not set. API calls will be rejected.");
    }

    let stations = match StationIndex::load(&config.station_list) {
        Ok(stations) => {
            info!(count = stations.len(), "loaded station names");
            stations
        }
        Err(e) => {
            warn!(error = %e, "station suggestions unavailable");
            StationIndex::default()
        }
    };

    let client = match TransportClient::new(config.client_config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create API client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let input = match TerminalInput::new(Arc::new(stations)) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Failed to start line editor: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut repl = Repl::new(Dispatcher::new(client), input, std::io::stdout());
    match repl.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
