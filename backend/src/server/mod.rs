//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use std::future::Future;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use referrals::Trace;
#[cfg(debug_assertions)]
use referrals::doc::ApiDoc;
use referrals::domain::RegistrationService;
use referrals::inbound::http::configure_api;
use referrals::inbound::http::cors::allow_any_origin;
use referrals::inbound::http::health::{HealthState, live, ready};
use referrals::inbound::http::state::HttpState;
use referrals::inbound::http::static_files::{StaticAssets, asset, index};
use referrals::outbound::memory::InMemoryUserRepository;
use referrals::outbound::referral_codes::RandomReferralCodes;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    static_assets: Option<web::Data<StaticAssets>>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        static_assets,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(allow_any_origin())
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    // Registered last: `/{file}` would otherwise shadow single-segment routes.
    app.configure(move |cfg| {
        if let Some(assets) = static_assets {
            cfg.app_data(assets).service(index).service(asset);
        }
    })
}

fn build_http_state() -> std::io::Result<web::Data<HttpState>> {
    let repo = InMemoryUserRepository::seeded()
        .map_err(|err| std::io::Error::other(format!("invalid demo users: {err}")))?;
    let service = Arc::new(RegistrationService::new(
        Arc::new(repo),
        Arc::new(RandomReferralCodes),
    ));
    Ok(web::Data::new(HttpState::new(service.clone(), service)))
}

fn open_static_assets(config: &ServerConfig) -> Option<web::Data<StaticAssets>> {
    let dir = config.static_dir.as_ref()?;
    match StaticAssets::open(dir) {
        Ok(assets) => Some(web::Data::new(assets)),
        Err(error) => {
            warn!(path = %dir.display(), %error, "static assets unavailable; serving API only");
            None
        }
    }
}

async fn drain_after<S>(interrupt: S, health_state: web::Data<HealthState>)
where
    S: Future<Output = std::io::Result<()>>,
{
    match interrupt.await {
        Ok(()) => {
            info!("interrupt received; draining");
            health_state.begin_draining();
        }
        Err(error) => warn!(%error, "interrupt listener unavailable"),
    }
}

/// Construct an Actix HTTP server over a freshly seeded user store.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding fails or the socket cannot be
/// bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state()?;
    let static_assets = open_static_assets(&config);
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            static_assets: static_assets.clone(),
        })
    })
    .bind(bind_addr)?;

    for addr in server.addrs() {
        info!(%addr, "listening");
    }

    let server = server.run();
    actix_web::rt::spawn(drain_after(tokio::signal::ctrl_c(), health_state.clone()));
    health_state.mark_ready();
    Ok(server)
}
