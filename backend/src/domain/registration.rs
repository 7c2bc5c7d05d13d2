//! Registration and user lookup service.
//!
//! Implements the [`UserRegistration`] and [`UsersQuery`] driving ports on top
//! of a [`UserRepository`] and a [`ReferralCodeSource`]. Registrations are
//! serialised by a service-wide lock so the email check, the referrer lookup,
//! the append and the referrer credit behave as one step.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    ReferralCodeSource, RegistrationReceipt, RegistrationRequest, UserRegistration,
    UserRepository, UserRepositoryError, UsersQuery,
};
use crate::domain::{
    EmailAddress, Error, NewUser, REFERRAL_NUMBER_MAX, ReferralCode, User, UserName,
    referral_prefix,
};

/// Points granted to the owner of a cited referral code.
pub const REFERRER_CREDIT: u64 = 10;
/// Starting points for a user who registered with a valid referral code.
pub const REFERRED_USER_CREDIT: u64 = 5;
/// Candidate codes drawn before accepting a duplicate.
pub const REFERRAL_CODE_ATTEMPTS: usize = 16;

/// Rejection for a registration without a name or email.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and email are required";
const EMPTY_MESSAGE: &str = "Name and email cannot be empty";
const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered";
const INVALID_REFERRAL_MESSAGE: &str = "Invalid referral code";
const NOT_FOUND_MESSAGE: &str = "User not found";

/// Registration service implementing the user driving ports.
pub struct RegistrationService<R, C> {
    users: Arc<R>,
    codes: Arc<C>,
    registration_lock: Mutex<()>,
}

impl<R, C> RegistrationService<R, C> {
    /// Create a service over `users`, drawing code suffixes from `codes`.
    pub fn new(users: Arc<R>, codes: Arc<C>) -> Self {
        Self {
            users,
            codes,
            registration_lock: Mutex::new(()),
        }
    }
}

struct ValidatedRegistration {
    name: UserName,
    email: EmailAddress,
    referral_code: Option<String>,
}

fn is_missing(field: Option<&str>) -> bool {
    field.is_none_or(str::is_empty)
}

fn validate(request: RegistrationRequest) -> Result<ValidatedRegistration, Error> {
    let RegistrationRequest {
        name,
        email,
        referral_code,
    } = request;

    if is_missing(name.as_deref()) || is_missing(email.as_deref()) {
        debug!("registration rejected: missing name or email");
        return Err(Error::invalid_request(REQUIRED_FIELDS_MESSAGE));
    }

    let (Ok(name), Ok(email)) = (
        UserName::new(name.unwrap_or_default()),
        EmailAddress::new(email.unwrap_or_default()),
    ) else {
        debug!("registration rejected: blank name or email");
        return Err(Error::invalid_request(EMPTY_MESSAGE));
    };

    let referral_code = referral_code
        .map(|code| code.trim().to_owned())
        .filter(|code| !code.is_empty());

    Ok(ValidatedRegistration {
        name,
        email,
        referral_code,
    })
}

fn map_repository_error(err: UserRepositoryError) -> Error {
    error!(error = %err, "user repository failure");
    Error::internal(format!("user repository error: {err}"))
}

impl<R, C> RegistrationService<R, C>
where
    R: UserRepository,
    C: ReferralCodeSource,
{
    async fn allocate_referral_code(&self, name: &UserName) -> Result<ReferralCode, Error> {
        let prefix = referral_prefix(name.as_ref());
        let mut candidate = ReferralCode::compose(&prefix, self.draw_number());
        for attempt in 1..=REFERRAL_CODE_ATTEMPTS {
            let taken = self
                .users
                .find_by_referral_code(candidate.as_ref())
                .await
                .map_err(map_repository_error)?
                .is_some();
            if !taken {
                return Ok(candidate);
            }
            if attempt < REFERRAL_CODE_ATTEMPTS {
                candidate = ReferralCode::compose(&prefix, self.draw_number());
            }
        }
        warn!(
            code = %candidate,
            attempts = REFERRAL_CODE_ATTEMPTS,
            "referral code space exhausted; keeping duplicate code"
        );
        Ok(candidate)
    }

    fn draw_number(&self) -> u16 {
        self.codes.next_number().min(REFERRAL_NUMBER_MAX)
    }

    async fn resolve_referrer(&self, code: &str) -> Result<User, Error> {
        self.users
            .find_by_referral_code(code)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                debug!(code, "registration rejected: unknown referral code");
                Error::invalid_request(INVALID_REFERRAL_MESSAGE)
            })
    }
}

#[async_trait]
impl<R, C> UserRegistration for RegistrationService<R, C>
where
    R: UserRepository,
    C: ReferralCodeSource,
{
    async fn register(&self, request: RegistrationRequest) -> Result<RegistrationReceipt, Error> {
        let ValidatedRegistration {
            name,
            email,
            referral_code,
        } = validate(request)?;

        let _guard = self.registration_lock.lock().await;

        if self
            .users
            .find_by_email(email.as_ref())
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            debug!("registration rejected: email already registered");
            return Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let referrer = match referral_code.as_deref() {
            Some(cited) => Some(self.resolve_referrer(cited).await?),
            None => None,
        };

        let code = self.allocate_referral_code(&name).await?;

        let draft = NewUser {
            name,
            email,
            referral_code: code,
            points: if referrer.is_some() {
                REFERRED_USER_CREDIT
            } else {
                0
            },
        };
        let (user, referred_by) = match referrer {
            Some(referrer) => {
                let stored = self
                    .users
                    .append_referred(draft, referrer.id(), REFERRER_CREDIT)
                    .await
                    .map_err(map_repository_error)?;
                let Some(user) = stored else {
                    error!(referrer = %referrer.id(), "referrer vanished before credit");
                    return Err(Error::internal("referrer missing during credit"));
                };
                (user, Some(referrer.id()))
            }
            None => (
                self.users.append(draft).await.map_err(map_repository_error)?,
                None,
            ),
        };

        info!(
            user_id = %user.id(),
            referral_code = %user.referral_code(),
            referred = referred_by.is_some(),
            "user registered"
        );
        Ok(RegistrationReceipt { user, referred_by })
    }
}

#[async_trait]
impl<R, C> UsersQuery for RegistrationService<R, C>
where
    R: UserRepository,
    C: ReferralCodeSource,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list_all().await.map_err(map_repository_error)
    }

    async fn find_by_referral_code(&self, code: &str) -> Result<User, Error> {
        self.users
            .find_by_referral_code(code)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
mod tests;
