//! Test utilities shared by unit tests and the integration suites under
//! `tests/`. Compiled for tests or with the `test-support` feature.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::RegistrationService;
use crate::domain::ports::ScriptedReferralCodeSource;
use crate::inbound::http::configure_api;
use crate::inbound::http::cors::allow_any_origin;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserRepository;

/// Handler state over a freshly seeded store whose generated referral codes
/// end in the numbers of `script`, replayed cyclically.
///
/// # Panics
/// Panics if the demo users fail validation.
///
/// # Examples
/// ```
/// use referrals::test_support::seeded_state;
///
/// let _state = seeded_state([7, 8, 9]);
/// ```
#[must_use]
pub fn seeded_state(script: impl IntoIterator<Item = u16>) -> web::Data<HttpState> {
    let repo = InMemoryUserRepository::seeded().expect("demo users are valid");
    let service = Arc::new(RegistrationService::new(
        Arc::new(repo),
        Arc::new(ScriptedReferralCodeSource::new(script)),
    ));
    web::Data::new(HttpState::new(service.clone(), service))
}

/// API application wired the way the server wires it, minus static assets
/// and Swagger UI.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .wrap(allow_any_origin())
        .configure(configure_api)
}
