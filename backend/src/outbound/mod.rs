//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local user store seeded with demo users.
//! - **referral_codes**: random suffixes for generated referral codes.
//!
//! Adapters translate between domain types and their backing resources and
//! contain no business rules.

pub mod memory;
pub mod referral_codes;
