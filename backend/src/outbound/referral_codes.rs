//! Random referral code suffixes backed by `rand`.

use rand::Rng;

use crate::domain::REFERRAL_NUMBER_MAX;
use crate::domain::ports::ReferralCodeSource;

/// Draws suffixes uniformly from `0..=999` using the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomReferralCodes;

impl ReferralCodeSource for RandomReferralCodes {
    fn next_number(&self) -> u16 {
        rand::thread_rng().gen_range(0..=REFERRAL_NUMBER_MAX)
    }
}
