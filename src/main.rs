use std::sync::Arc;

use tracing::info;

use volstore::web::handlers::AppState;
use volstore::web::WebServer;
use volstore::{Config, VolumeService};

#[tokio::main]
async fn main() {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "project_properties.json".to_string());
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = volstore::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        volstore::logging::init_console_only(&config.logging.level);
    }

    info!("{} v{}", config.app.name, env!("CARGO_PKG_VERSION"));
    info!("Volume path: {}", config.volume.path);
    info!("Max file size: {} MB", config.app.max_file_size_mb);

    let volume = match VolumeService::new(config.volume.path.as_str(), config.max_file_size_bytes())
    {
        Ok(volume) => volume,
        Err(e) => {
            eprintln!("Failed to initialize volume storage: {e}");
            std::process::exit(1);
        }
    };

    let server_config = config.server.clone();
    let app_state = Arc::new(AppState::new(Arc::new(config), volume));
    let server = WebServer::new(&server_config, app_state);

    if let Err(e) = server.serve().await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
