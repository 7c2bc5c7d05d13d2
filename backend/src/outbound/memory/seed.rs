//! Demo users present in every freshly started store.

use crate::domain::{User, UserValidationError};

const DEMO_USERS: [(u64, &str, &str, &str); 3] = [
    (1, "Alice Johnson", "alice@example.com", "ALICE123"),
    (2, "Bob Smith", "bob@example.com", "BOB456"),
    (3, "Carol Davis", "carol@example.com", "CAROL789"),
];

/// Alice, Bob and Carol with zero points, in id order.
///
/// # Examples
/// ```
/// use referrals::outbound::memory::demo_users;
///
/// let users = demo_users().expect("valid demo users");
/// assert_eq!(users.len(), 3);
/// assert_eq!(users[1].referral_code().as_ref(), "BOB456");
/// ```
pub fn demo_users() -> Result<Vec<User>, UserValidationError> {
    DEMO_USERS
        .iter()
        .map(|(id, name, email, code)| User::try_from_parts(*id, name, email, code, 0))
        .collect()
}
