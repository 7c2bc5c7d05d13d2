//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they only
//! depend on domain ports and stay testable without a real store.

use std::sync::Arc;

use crate::domain::ports::{UserRegistration, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side: listing and referral code lookup.
    pub users: Arc<dyn UsersQuery>,
    /// Write side: registration.
    pub registration: Arc<dyn UserRegistration>,
}

impl HttpState {
    /// Bundle the user ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use referrals::domain::RegistrationService;
    /// use referrals::inbound::http::state::HttpState;
    /// use referrals::outbound::memory::InMemoryUserRepository;
    /// use referrals::outbound::referral_codes::RandomReferralCodes;
    ///
    /// let repo = InMemoryUserRepository::seeded().expect("seed users");
    /// let service = Arc::new(RegistrationService::new(
    ///     Arc::new(repo),
    ///     Arc::new(RandomReferralCodes),
    /// ));
    /// let _state = HttpState::new(service.clone(), service);
    /// ```
    pub fn new(users: Arc<dyn UsersQuery>, registration: Arc<dyn UserRegistration>) -> Self {
        Self {
            users,
            registration,
        }
    }
}
