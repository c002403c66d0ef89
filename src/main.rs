use std::sync::Arc;
use tracing::{error, info};
use zerobug_notifier::logging::{FileLogger, setup_logging};
use zerobug_notifier::{AppState, api, load_config};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_CONFIG_PATH: &str = "zerobug.toml";
const DEFAULT_MAX_BUILDS: usize = 24;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    let config_path =
        std::env::var("ZEROBUG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let file_logger = config.log.as_ref().map(FileLogger::from_config);
    let _log_guard = match setup_logging(file_logger.as_ref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Logging setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(config, DEFAULT_MAX_BUILDS) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to build notifier: {}", e);
            std::process::exit(1);
        }
    };

    let app = api::router(state);

    info!("Listening on {}", bind_address);
    info!("Using config at {:?}", config_path);
    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_address, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
