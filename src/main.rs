//! HTTP server for the coaster registry.
//!
//! Endpoints: health, list/get/create/update coasters, add/remove wagons.
//! Configuration comes from the environment (and `.env`); see [`ServerConfig`].

use coaster_api::api;
use coaster_api::{CoasterRegistry, ServerConfig};
use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let _ = env_logger::try_init();
    let config = ServerConfig::from_env();

    let registry = CoasterRegistry::open(&config.store_path);
    let app = api::create_router(registry);

    let addr = config.listen_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("bind failed addr={} error={}", addr, e);
            std::process::exit(1);
        }
    };
    info!(
        "listening on http://{} mode={} store={}",
        addr,
        config.environment.as_str(),
        config.store_path.display()
    );
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("server error: {}", e);
        std::process::exit(1);
    }
}
