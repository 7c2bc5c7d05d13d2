//! Referral tracking service.
//!
//! Users register with a name and email, optionally citing another user's
//! referral code; both parties then receive points. The domain lives in
//! [`domain`], HTTP adapters in [`inbound`] and the in-memory store in
//! [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
