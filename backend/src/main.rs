//! Service entry-point: loads settings, initialises logging and runs the
//! HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use referrals::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = ServerConfig::new(settings.bind_addr()?).with_static_dir(settings.static_dir());

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
