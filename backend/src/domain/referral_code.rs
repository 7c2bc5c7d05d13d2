//! Referral codes and the rule that derives them from a user's name.
//!
//! A generated code is up to [`REFERRAL_PREFIX_LEN`] uppercase ASCII letters
//! taken from the name, followed by an unpadded number in
//! `0..=REFERRAL_NUMBER_MAX`. Seeded codes such as `ALICE123` predate the rule
//! and only need to satisfy [`ReferralCode::new`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of letters taken from the name.
pub const REFERRAL_PREFIX_LEN: usize = 3;
/// Largest numeric suffix a generated code may carry.
pub const REFERRAL_NUMBER_MAX: u16 = 999;

/// Validation errors returned by [`ReferralCode::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferralCodeValidationError {
    /// The code is empty.
    #[error("referral code must not be empty")]
    Empty,
    /// The code has leading or trailing whitespace.
    #[error("referral code must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Code other users cite to credit the owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Validate and wrap an existing code.
    ///
    /// # Examples
    /// ```
    /// use referrals::domain::ReferralCode;
    ///
    /// let code = ReferralCode::new("ALICE123").expect("valid code");
    /// assert_eq!(code.as_ref(), "ALICE123");
    /// assert!(ReferralCode::new(" BOB456").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> Result<Self, ReferralCodeValidationError> {
        let code = code.into();
        if code.is_empty() {
            return Err(ReferralCodeValidationError::Empty);
        }
        if code.trim() != code {
            return Err(ReferralCodeValidationError::SurroundingWhitespace);
        }
        Ok(Self(code))
    }

    /// Join a prefix and numeric suffix without a separator.
    ///
    /// The suffix always contributes at least one digit, so the result is
    /// never empty.
    ///
    /// # Examples
    /// ```
    /// use referrals::domain::{ReferralCode, referral_prefix};
    ///
    /// let code = ReferralCode::compose(&referral_prefix("Ada Lovelace"), 42);
    /// assert_eq!(code.as_ref(), "ADA42");
    /// ```
    #[must_use]
    pub fn compose(prefix: &str, number: u16) -> Self {
        Self(format!("{prefix}{number}"))
    }
}

/// Uppercase `name`, keep ASCII `A`-`Z` only, and take the first three.
///
/// Names without Latin letters yield an empty prefix.
///
/// # Examples
/// ```
/// use referrals::domain::referral_prefix;
///
/// assert_eq!(referral_prefix("Carol Davis"), "CAR");
/// assert_eq!(referral_prefix("Al"), "AL");
/// assert_eq!(referral_prefix("42"), "");
/// ```
#[must_use]
pub fn referral_prefix(name: &str) -> String {
    name.to_uppercase()
        .chars()
        .filter(char::is_ascii_uppercase)
        .take(REFERRAL_PREFIX_LEN)
        .collect()
}

impl AsRef<str> for ReferralCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ReferralCode> for String {
    fn from(value: ReferralCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for ReferralCode {
    type Error = ReferralCodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
