//! Driving port for user-facing reads.
//!
//! HTTP handlers use this port to list users and resolve referral codes
//! without touching the store directly.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user owning `code`.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when no user has the
    /// code. Matching is exact and case-sensitive.
    async fn find_by_referral_code(&self, code: &str) -> Result<User, Error>;
}
