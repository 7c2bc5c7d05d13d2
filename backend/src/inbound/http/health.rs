//! Readiness and liveness probes.
//!
//! The server moves through three phases: starting (not ready), serving and
//! draining. Once draining begins after an interrupt, both probes answer 503.
use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

const STARTING: u8 = 0;
const SERVING: u8 = 1;
const DRAINING: u8 = 2;

/// Lifecycle phase shared between the server bootstrap and the probes.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(STARTING),
        }
    }
}

impl HealthState {
    /// Start in the not-ready phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener is bound; accept traffic. Ignored once draining.
    pub fn mark_ready(&self) {
        if self
            .phase
            .compare_exchange(STARTING, SERVING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("readiness ignored outside the starting phase");
        }
    }

    /// Stop advertising the service. Irreversible.
    pub fn begin_draining(&self) {
        self.phase.store(DRAINING, Ordering::Release);
    }

    /// True while serving traffic.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase.load(Ordering::Acquire) == SERVING
    }

    /// True until draining begins.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.phase.load(Ordering::Acquire) != DRAINING
    }
}

/// Probe outcome body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeBody {
    /// `ok` or `unavailable`.
    #[schema(example = "ok")]
    pub status: String,
}

fn probe_response(ok: bool) -> HttpResponse {
    let (mut builder, status) = if ok {
        (HttpResponse::Ok(), "ok")
    } else {
        (HttpResponse::ServiceUnavailable(), "unavailable")
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeBody {
            status: status.to_owned(),
        })
}

/// 200 while serving, 503 while starting or draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Accepting registrations", body = ProbeBody),
        (status = 503, description = "Starting or draining", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// 200 until draining begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is up", body = ProbeBody),
        (status = 503, description = "Draining after an interrupt", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}
