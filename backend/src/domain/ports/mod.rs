//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod referral_code_source;
mod user_registration;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use referral_code_source::MockReferralCodeSource;
pub use referral_code_source::{ReferralCodeSource, ScriptedReferralCodeSource};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{RegistrationReceipt, RegistrationRequest, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

#[cfg(test)]
mod tests;
