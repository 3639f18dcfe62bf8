//! Per-client fixed-window rate limiting.
//!
//! Each limiter counts requests per client IP inside a window. Once the
//! count exceeds the limit the request is answered with 429 until the
//! window rolls over. `RateLimit-*` headers report the current state.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api_error::ApiError;

/// Window entries above this count trigger a sweep of expired clients.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_after: Duration,
}

#[derive(Debug)]
pub struct RateLimiter {
    max: u32,
    window: Duration,
    message: &'static str,
    clients: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration, message: &'static str) -> Self {
        Self { max, window, message, clients: Mutex::new(HashMap::new()) }
    }

    /// Records one request from `client` at `now`.
    pub fn hit(&self, client: IpAddr, now: Instant) -> Decision {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if clients.len() > SWEEP_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = clients.entry(client).or_insert(Window { started: now, hits: 0 });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window { started: now, hits: 0 };
        }
        entry.hits = entry.hits.saturating_add(1);

        Decision {
            allowed: entry.hits <= self.max,
            remaining: self.max.saturating_sub(entry.hits),
            reset_after: self.window.saturating_sub(now.duration_since(entry.started)),
        }
    }

    /// Leaves headers set by an inner, more specific limiter untouched.
    fn write_headers(&self, headers: &mut HeaderMap, decision: Decision) {
        if headers.contains_key("ratelimit-limit") {
            return;
        }
        let reset_secs = decision.reset_after.as_secs()
            + u64::from(decision.reset_after.subsec_nanos() > 0);
        headers.insert(HeaderName::from_static("ratelimit-limit"), HeaderValue::from(self.max));
        headers.insert(
            HeaderName::from_static("ratelimit-remaining"),
            HeaderValue::from(decision.remaining),
        );
        headers.insert(HeaderName::from_static("ratelimit-reset"), HeaderValue::from(reset_secs));
    }
}

/// Client address from the connection, or unspecified when the server
/// was not started with connect info (e.g. in router tests).
fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |ConnectInfo(addr)| addr.ip())
}

/// Middleware for `axum::middleware::from_fn_with_state`.
pub async fn enforce(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_ip(&request);
    let decision = limiter.hit(client, Instant::now());
    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        tracing::warn!(%client, "rate limit exceeded");
        ApiError::TooManyRequests(limiter.message.to_owned()).into_response()
    };
    limiter.write_headers(response.headers_mut(), decision);
    response
}
