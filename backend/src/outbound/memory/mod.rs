//! In-memory user store.
//!
//! Users live in a `Vec` guarded by a `std::sync::Mutex` together with the
//! next identifier. No lock is held across an `.await`, so the blocking mutex
//! is safe inside async handlers. Contents are lost when the process exits.

mod seed;

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId, UserValidationError};

pub use seed::demo_users;

#[derive(Debug)]
struct UserStore {
    users: Vec<User>,
    next_id: UserId,
}

impl UserStore {
    fn push(&mut self, user: NewUser) -> User {
        let id = self.next_id;
        let user = user.into_user(id);
        self.users.push(user.clone());
        self.next_id = id.next();
        debug!(user_id = %id, "user appended");
        user
    }

    fn credit(&mut self, id: UserId, amount: u64) -> Option<User> {
        self.users
            .iter_mut()
            .find(|user| user.id() == id)
            .map(|user| {
                user.credit_points(amount);
                user.clone()
            })
    }
}

/// Process-local [`UserRepository`].
///
/// # Examples
/// ```
/// use referrals::domain::ports::UserRepository;
/// use referrals::outbound::memory::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repo = InMemoryUserRepository::seeded().expect("seed users");
/// let bob = repo.find_by_referral_code("BOB456").await.expect("lookup");
/// assert_eq!(bob.map(|u| u.id().get()), Some(2));
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: Mutex<UserStore>,
}

impl InMemoryUserRepository {
    /// Empty store whose first identifier is `1`.
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Store holding the demo users; the next identifier is `4`.
    pub fn seeded() -> Result<Self, UserValidationError> {
        demo_users().map(Self::with_users)
    }

    /// Store holding `users` in the given order.
    ///
    /// The next identifier follows the largest existing one.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .map(User::id)
            .max()
            .map_or(UserId::new(1), UserId::next);
        Self {
            store: Mutex::new(UserStore { users, next_id }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserStore>, UserRepositoryError> {
        self.store
            .lock()
            .map_err(|err| UserRepositoryError::query(format!("user store poisoned: {err}")))
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.lock()?.users.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .users
            .iter()
            .find(|user| user.email().as_ref() == email)
            .cloned())
    }

    async fn find_by_referral_code(
        &self,
        code: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .users
            .iter()
            .find(|user| user.referral_code().as_ref() == code)
            .cloned())
    }

    async fn append(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        Ok(self.lock()?.push(user))
    }

    async fn append_referred(
        &self,
        user: NewUser,
        referrer: UserId,
        amount: u64,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut store = self.lock()?;
        if store.credit(referrer, amount).is_none() {
            return Ok(None);
        }
        Ok(Some(store.push(user)))
    }
}
