//! Domain primitives, services and ports.
//!
//! Purpose: define the user model, the referral code rule and the
//! registration use-case independently of HTTP and storage. Types document
//! their invariants and serialisation contracts in their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload with a stable code.
//! - TraceId: per-request correlation identifier.
//! - User, UserId, NewUser: stored user records and drafts.
//! - ReferralCode, referral_prefix: referral code rule.
//! - RegistrationService: implementation of the user driving ports.

pub mod error;
pub mod ports;
pub mod referral_code;
pub mod registration;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::referral_code::{
    REFERRAL_NUMBER_MAX, REFERRAL_PREFIX_LEN, ReferralCode, ReferralCodeValidationError,
    referral_prefix,
};
pub use self::registration::{
    REFERRAL_CODE_ATTEMPTS, REFERRED_USER_CREDIT, REFERRER_CREDIT, REQUIRED_FIELDS_MESSAGE,
    RegistrationService,
};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, NewUser, User, UserId, UserName, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use referrals::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
