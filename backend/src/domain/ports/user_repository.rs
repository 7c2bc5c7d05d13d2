//! Port abstraction for user storage adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Storage errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Ordered user store.
///
/// Adapters keep insertion order and assign identifiers sequentially on
/// [`UserRepository::append`]. Email and referral code lookups are exact
/// and case-sensitive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user in insertion order.
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// First user whose email equals `email`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// First user whose referral code equals `code`.
    async fn find_by_referral_code(&self, code: &str)
    -> Result<Option<User>, UserRepositoryError>;

    /// Assign the next identifier to `user` and store it at the end.
    async fn append(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Store `user` and add `amount` points to `referrer` as one write.
    ///
    /// Returns `None` and leaves the store untouched when `referrer` does
    /// not exist.
    async fn append_referred(
        &self,
        user: NewUser,
        referrer: UserId,
        amount: u64,
    ) -> Result<Option<User>, UserRepositoryError>;
}
