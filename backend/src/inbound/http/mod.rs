//! HTTP inbound adapter exposing the JSON API, probes and static assets.

pub mod cors;
pub mod error;
pub mod health;
pub mod state;
pub mod static_files;
pub mod users;

use actix_web::{guard, web};

pub use error::{ErrorBody, json_config};

/// Register the `/api` scope: user endpoints, JSON extraction rules and the
/// CORS preflight responder.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use referrals::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .service(users::list_users)
            .service(users::register)
            .service(users::find_user_by_referral_code)
            .service(
                web::resource("/{tail:.*}")
                    .guard(guard::Options())
                    .to(cors::preflight),
            ),
    );
}
