// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//
//! Request throttling
//! `limit` requests per `ttl` window for each client address.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use nonzero_ext::nonzero;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;

/// Peer address; requests without connection info share the `None` bucket.
pub type ClientKey = Option<IpAddr>;

type KeyedLimiter = RateLimiter<ClientKey, DefaultKeyedStateStore<ClientKey>, DefaultClock>;

/// Longest window the limiter tracks; bucket arithmetic is in `u64` nanoseconds.
pub const MAX_WINDOW: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Clone)]
pub struct Throttle {
    limiter: Arc<KeyedLimiter>,
    clock: DefaultClock,
}

impl Throttle {
    pub fn new(config: &RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(u32::try_from(config.limit).unwrap_or(u32::MAX))
            .unwrap_or(nonzero!(1u32));
        let mut window = config.window();
        if window > MAX_WINDOW {
            warn!(
                "Throttle window of {}ms exceeds {}s, clamping",
                config.ttl,
                MAX_WINDOW.as_secs()
            );
            window = MAX_WINDOW;
        }
        // Full burst available up front, refilled evenly across the window.
        let period = (window / burst.get()).max(Duration::from_nanos(1));
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            clock: DefaultClock::default(),
        }
    }

    /// `Err` carries how long the client has to wait.
    pub fn check(&self, key: ClientKey) -> Result<(), Duration> {
        self.limiter
            .check_key(&key)
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    /// Drops buckets that are back at full capacity.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        debug!("Throttle buckets after cleanup: {}", self.limiter.len());
    }
}

pub async fn throttle(State(throttle): State<Throttle>, req: Request, next: Next) -> Response {
    let key = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match throttle.check(key) {
        Ok(()) => next.run(req).await,
        Err(wait) => {
            warn!("Throttled request from {:?} to {}", key, req.uri().path());
            too_many_requests(wait)
        }
    }
}

fn too_many_requests(wait: Duration) -> Response {
    let retry_after = wait.as_secs_f64().ceil().max(1.0) as u64;
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(serde_json::json!({
            "statusCode": 429,
            "message": "Too Many Requests",
        })),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
