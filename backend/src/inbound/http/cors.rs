//! Permissive cross-origin access for browser clients.
//!
//! Every response allows any origin. Preflight requests under `/api` are
//! answered directly with the allowed methods and headers.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

/// Middleware adding `Access-Control-Allow-Origin: *` to every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use referrals::inbound::http::cors::allow_any_origin;
///
/// let _app = App::new().wrap(allow_any_origin());
/// ```
#[must_use]
pub fn allow_any_origin() -> DefaultHeaders {
    DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
}

/// Answer a CORS preflight with 204.
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .finish()
}
