//! Port supplying the numeric suffix of generated referral codes.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::REFERRAL_NUMBER_MAX;

/// Source of referral code suffixes.
///
/// Implementations return a value in `0..=REFERRAL_NUMBER_MAX`. Larger
/// values are clamped by the caller.
#[cfg_attr(test, mockall::automock)]
pub trait ReferralCodeSource: Send + Sync {
    /// Next suffix to try.
    fn next_number(&self) -> u16;
}

/// Deterministic source that replays a fixed script, wrapping around at the
/// end. An empty script always yields `0`.
///
/// # Examples
/// ```
/// use referrals::domain::ports::{ReferralCodeSource, ScriptedReferralCodeSource};
///
/// let source = ScriptedReferralCodeSource::new([7, 42]);
/// assert_eq!(source.next_number(), 7);
/// assert_eq!(source.next_number(), 42);
/// assert_eq!(source.next_number(), 7);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedReferralCodeSource {
    script: Vec<u16>,
    cursor: AtomicUsize,
}

impl ScriptedReferralCodeSource {
    /// Replay `script` in order.
    pub fn new(script: impl IntoIterator<Item = u16>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl ReferralCodeSource for ScriptedReferralCodeSource {
    fn next_number(&self) -> u16 {
        if self.script.is_empty() {
            return 0;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.script.len();
        self.script
            .get(index)
            .copied()
            .unwrap_or_default()
            .min(REFERRAL_NUMBER_MAX)
    }
}
