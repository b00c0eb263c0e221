//! Fixed-window rate limiting: a global budget for the whole API plus
//! tighter budgets for the public auth routes.
//!
//! Clients are keyed by peer address. `X-Forwarded-For` is read only when
//! `TRUST_PROXY` is set, since otherwise any client can rotate it.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::AppError;
use crate::state::AppState;

/// Requests allowed per IP per window across `/api/v1`.
pub const API_MAX_REQUESTS: u32 = 100;
pub const API_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Registrations allowed per IP per window.
pub const REGISTER_MAX_REQUESTS: u32 = 10;
pub const REGISTER_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Login attempts allowed per IP per window.
pub const LOGIN_MAX_REQUESTS: u32 = 20;
pub const LOGIN_WINDOW: Duration = Duration::from_secs(15 * 60);

struct IpEntry {
    count: u32,
    window_start: Instant,
}

/// Per-route, per-IP request counters.
#[derive(Clone, Default)]
pub struct RateLimiter {
    /// route name -> (IP -> entry)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, IpEntry>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request; `true` if it is within the limit.
    pub async fn check(
        &self,
        route: &'static str,
        ip: &str,
        max_requests: u32,
        window: Duration,
    ) -> bool {
        let mut routes = self.inner.lock().await;
        let now = Instant::now();
        let entry = routes
            .entry(route)
            .or_default()
            .entry(ip.to_owned())
            .or_insert_with(|| IpEntry {
                count: 0,
                window_start: now,
            });

        if now.duration_since(entry.window_start) >= window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= max_requests
    }

    /// Drop entries whose window started more than `max_age` ago.
    pub async fn cleanup(&self, max_age: Duration) {
        let mut routes = self.inner.lock().await;
        let now = Instant::now();
        for ips in routes.values_mut() {
            ips.retain(|_, entry| now.duration_since(entry.window_start) < max_age);
        }
        routes.retain(|_, ips| !ips.is_empty());
    }
}

/// Client IP: the peer address, or the first `X-Forwarded-For` hop when
/// the server sits behind a trusted proxy.
fn client_ip(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .and_then(|ip| ip.parse::<IpAddr>().ok());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn limit(
    state: &AppState,
    route: &'static str,
    max_requests: u32,
    window: Duration,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request, state.config.trust_proxy);
    if !state.rate_limiter.check(route, &ip, max_requests, window).await {
        tracing::warn!(route, ip = %ip, "Rate limit exceeded");
        return AppError::TooManyRequests.into_response();
    }
    next.run(request).await
}

/// Rate limit middleware for every `/api/v1` route.
pub async fn api_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    limit(&state, "api", API_MAX_REQUESTS, API_WINDOW, request, next).await
}

/// Rate limit middleware for `POST /auth/login`.
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    limit(&state, "login", LOGIN_MAX_REQUESTS, LOGIN_WINDOW, request, next).await
}

/// Rate limit middleware for `POST /auth/register`.
pub async fn register_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    limit(
        &state,
        "register",
        REGISTER_MAX_REQUESTS,
        REGISTER_WINDOW,
        request,
        next,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_limit_then_blocks() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);
        for _ in 0..3 {
            assert!(limiter.check("login", "10.0.0.1", 3, window).await);
        }
        assert!(!limiter.check("login", "10.0.0.1", 3, window).await);
    }

    #[tokio::test]
    async fn counters_are_per_ip_and_per_route() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);
        assert!(limiter.check("login", "10.0.0.1", 1, window).await);
        assert!(!limiter.check("login", "10.0.0.1", 1, window).await);
        assert!(limiter.check("login", "10.0.0.2", 1, window).await);
        assert!(limiter.check("register", "10.0.0.1", 1, window).await);
    }

    #[tokio::test(start_paused = true)]
    async fn window_resets_after_expiry() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);
        assert!(limiter.check("login", "ip", 1, window).await);
        assert!(!limiter.check("login", "ip", 1, window).await);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(limiter.check("login", "ip", 1, window).await);
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_drops_stale_entries() {
        let limiter = RateLimiter::new();
        limiter
            .check("login", "ip", 1, Duration::from_secs(60))
            .await;
        tokio::time::advance(Duration::from_secs(600)).await;
        limiter.cleanup(Duration::from_secs(300)).await;
        assert!(limiter.inner.lock().await.is_empty());
    }

    fn from_peer(forwarded: Option<&str>) -> Request {
        let mut builder = Request::builder()
            .extension(ConnectInfo(SocketAddr::from(([198, 51, 100, 7], 40000))));
        if let Some(forwarded) = forwarded {
            builder = builder.header("x-forwarded-for", forwarded);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[test]
    fn peer_address_is_used_by_default() {
        let request = from_peer(Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_ip(&request, false), "198.51.100.7");

        let bare = Request::builder().body(axum::body::Body::empty()).unwrap();
        assert_eq!(client_ip(&bare, false), "unknown");
    }

    #[test]
    fn forwarded_for_is_read_behind_trusted_proxy() {
        let request = from_peer(Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_ip(&request, true), "203.0.113.7");

        // Garbage falls back to the peer instead of becoming a fresh key.
        let request = from_peer(Some("not-an-ip"));
        assert_eq!(client_ip(&request, true), "198.51.100.7");
    }
}
