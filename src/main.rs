use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

mod app;
mod app_state;
mod config;
mod db;
mod error;
mod middleware;
mod modules;
mod security;
mod telemetry;

use app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let env = config::Config::from_env().context("Failed to load configuration")?;

    let _telemetry = telemetry::init_telemetry(telemetry::TelemetryConfig::from_config(&env))
        .await
        .context("Failed to initialize telemetry")?;

    let pool = db::init_pool(&env.database)
        .await
        .context("Failed to connect to database")?;

    let addr = env.server_addr();
    let app_name = env.app.name.clone();

    let state = AppState::new(pool, env);
    let router = app::create_router(state);

    info!("{} listening on {}", app_name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, router)
        .await
        .context("Failed to serve application")?;

    Ok(())
}
