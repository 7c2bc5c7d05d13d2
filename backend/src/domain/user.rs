//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::referral_code::{ReferralCode, ReferralCodeValidationError};

/// Validation errors returned when building user components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Name was empty after trimming.
    EmptyName,
    /// Email was empty after trimming.
    EmptyEmail,
    /// Referral code failed validation.
    ReferralCode(ReferralCodeValidationError),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::ReferralCode(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<ReferralCodeValidationError> for UserValidationError {
    fn from(value: ReferralCodeValidationError) -> Self {
        Self::ReferralCode(value)
    }
}

/// Sequential user identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Identifier that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! trimmed_text {
    ($(#[$meta:meta])* $name:ident, $empty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Trim surrounding whitespace and reject empty results.
            pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(UserValidationError::$empty);
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = UserValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

trimmed_text!(
    /// Registered user's name, stored trimmed.
    UserName,
    EmptyName
);

trimmed_text!(
    /// Registered user's email, stored trimmed and compared case-sensitively.
    EmailAddress,
    EmptyEmail
);

/// Registered user.
///
/// ## Invariants
/// - `name` and `email` are non-empty and carry no surrounding whitespace.
/// - `points` never decreases; only the referral credit step raises it.
///
/// Serialises as `{ id, name, email, referralCode, points }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = u64, example = 4)]
    id: UserId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    name: UserName,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
    #[schema(value_type = String, example = "ADA42")]
    referral_code: ReferralCode,
    #[schema(example = 5)]
    points: u64,
}

impl User {
    /// Build a user from validated components.
    #[must_use]
    pub fn new(
        id: UserId,
        name: UserName,
        email: EmailAddress,
        referral_code: ReferralCode,
        points: u64,
    ) -> Self {
        Self {
            id,
            name,
            email,
            referral_code,
            points,
        }
    }

    /// Fallible constructor for raw values such as seed fixtures.
    ///
    /// # Examples
    /// ```
    /// use referrals::domain::User;
    ///
    /// let user = User::try_from_parts(1, "Alice Johnson", "alice@example.com", "ALICE123", 0)
    ///     .expect("valid user");
    /// assert_eq!(user.referral_code().as_ref(), "ALICE123");
    /// ```
    pub fn try_from_parts(
        id: u64,
        name: &str,
        email: &str,
        referral_code: &str,
        points: u64,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id),
            UserName::new(name)?,
            EmailAddress::new(email)?,
            ReferralCode::new(referral_code)?,
            points,
        ))
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Trimmed name.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Trimmed email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Code other registrants cite to credit this user.
    #[must_use]
    pub fn referral_code(&self) -> &ReferralCode {
        &self.referral_code
    }

    /// Accumulated referral points.
    #[must_use]
    pub fn points(&self) -> u64 {
        self.points
    }

    /// Add referral points. Saturates instead of wrapping.
    pub(crate) fn credit_points(&mut self, amount: u64) {
        self.points = self.points.saturating_add(amount);
    }
}

/// Registration draft awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Trimmed name.
    pub name: UserName,
    /// Trimmed email.
    pub email: EmailAddress,
    /// Generated referral code.
    pub referral_code: ReferralCode,
    /// Starting points.
    pub points: u64,
}

impl NewUser {
    /// Attach the identifier chosen by the store.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        let Self {
            name,
            email,
            referral_code,
            points,
        } = self;
        User::new(id, name, email, referral_code, points)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: u64,
    name: String,
    email: String,
    referral_code: String,
    points: u64,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            referral_code,
            points,
        } = value;
        Self {
            id: id.get(),
            name: name.into(),
            email: email.into(),
            referral_code: referral_code.into(),
            points,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_parts(
            value.id,
            &value.name,
            &value.email,
            &value.referral_code,
            value.points,
        )
    }
}
