//! Driving port for registering users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Raw registration input as received from a caller.
///
/// Fields are untrimmed; `None` means the field was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Requested name.
    pub name: Option<String>,
    /// Requested email.
    pub email: Option<String>,
    /// Code of the user who referred this registrant.
    pub referral_code: Option<String>,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    /// The stored user, including their generated referral code and points.
    pub user: User,
    /// Referrer that was credited, if a referral code was applied.
    pub referred_by: Option<UserId>,
}

/// Domain use-case port for registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Validate `request`, store the new user and apply any referral credit.
    ///
    /// Invalid input, an already registered email and an unknown referral
    /// code all fail without changing the store.
    async fn register(&self, request: RegistrationRequest) -> Result<RegistrationReceipt, Error>;
}
