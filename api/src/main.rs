use anyhow::Context;
use actix_web::HttpServer;

use fl_api::{app, telemetry};
use fl_shared::config::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load the environment specific file first; plain `.env` fills the gaps
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    let state = app::AppState::new(&config).context("Failed to initialise services")?;
    state
        .seed_categories()
        .await
        .context("Failed to seed categories")?;

    let bind_address = config.server.bind_address();
    tracing::info!(
        environment = ?config.environment,
        address = %bind_address,
        "Starting Foodloopz API server"
    );

    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || app::create_app(state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server terminated with an error")
}
