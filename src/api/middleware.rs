//! Security middleware for API authentication and rate limiting.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::IpAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::config::ServerConfig;

/// Security settings for the HTTP API.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Bearer token required on every route except health
    pub api_key: Option<String>,
    /// Allowed CORS origins. `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    /// Rate limiter instance
    pub rate_limiter: Option<RateLimiter>,
}

impl SecurityConfig {
    /// Derive security settings from the server configuration.
    ///
    /// Rate limiting is only enabled alongside an API key, i.e. when the
    /// server is exposed beyond localhost.
    pub fn from_server_config(config: &ServerConfig) -> Self {
        let rate_limiter = config
            .api_key
            .as_ref()
            .map(|_| RateLimiter::new(config.rate_limit, Duration::from_secs(60)));

        Self {
            api_key: config.api_key.clone(),
            cors_origins: config.cors_origins.clone(),
            rate_limiter,
        }
    }

    /// Load security configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_server_config(&ServerConfig::from_env())
    }

    /// Create a config with no authentication (for local development/testing).
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            cors_origins: None,
            rate_limiter: None,
        }
    }

    /// Create a config with authentication enabled (for testing).
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            cors_origins: None,
            rate_limiter: None,
        }
    }

    /// Create a config with rate limiting enabled.
    pub fn with_rate_limit(max_requests: u32) -> Self {
        Self {
            api_key: None,
            cors_origins: None,
            rate_limiter: Some(RateLimiter::new(max_requests, Duration::from_secs(60))),
        }
    }
}

/// Simple in-memory rate limiter using sliding window.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    /// Maximum requests allowed per window
    max_requests: u32,
    /// Time window duration
    window: Duration,
    /// Request counts per IP
    requests: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl RateLimiter {
    /// Create a new rate limiter.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a request from the given IP is allowed.
    /// Returns true if allowed, false if rate limited.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let cutoff = now - self.window;

        let mut requests = self.requests.lock().expect("rate limiter lock poisoned");
        let entry = requests.entry(ip).or_default();

        // Remove expired entries
        entry.retain(|&t| t > cutoff);

        if entry.len() < self.max_requests as usize {
            entry.push(now);
            true
        } else {
            false
        }
    }

    /// Clean up old entries to prevent memory growth.
    pub fn cleanup(&self) {
        let cutoff = Instant::now() - self.window;
        let mut requests = self.requests.lock().expect("rate limiter lock poisoned");

        requests.retain(|_, timestamps| {
            timestamps.retain(|&t| t > cutoff);
            !timestamps.is_empty()
        });
    }
}

/// Authentication middleware requiring `Authorization: Bearer <api key>`.
///
/// Passes everything through when no key is configured.
pub async fn auth_middleware(
    State(config): State<SecurityConfig>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected_key) = config.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|h| h.strip_prefix("Bearer "));

    match token {
        Some(Some(token)) if token == expected_key => Ok(next.run(request).await),
        Some(Some(_)) => {
            tracing::warn!("Invalid API key provided");
            Err(StatusCode::UNAUTHORIZED)
        }
        Some(None) => {
            tracing::warn!("Invalid Authorization header format");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Per-client rate limiting middleware.
pub async fn rate_limit_middleware(
    State(rate_limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let ip = extract_client_ip(&request);

    if rate_limiter.check(ip) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Rate limit exceeded for IP: {}", ip);
        Err(StatusCode::TOO_MANY_REQUESTS)
    }
}

fn header_ip(request: &Request<Body>, name: &str) -> Option<IpAddr> {
    request
        .headers()
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Client IP from proxy headers, falling back to localhost.
fn extract_client_ip(request: &Request<Body>) -> IpAddr {
    header_ip(request, "X-Forwarded-For")
        .or_else(|| header_ip(request, "X-Real-IP"))
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn rate_limiter_allows_requests_under_limit() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.check(ip));
        }
    }

    #[test]
    fn rate_limiter_blocks_requests_over_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        // First 3 requests should be allowed
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));

        // 4th request should be blocked
        assert!(!limiter.check(ip));
    }

    #[test]
    fn rate_limiter_tracks_ips_independently() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let ip1: IpAddr = "192.168.1.1".parse().unwrap();
        let ip2: IpAddr = "192.168.1.2".parse().unwrap();

        // Both IPs should have their own limit
        assert!(limiter.check(ip1));
        assert!(limiter.check(ip1));
        assert!(!limiter.check(ip1));

        assert!(limiter.check(ip2));
        assert!(limiter.check(ip2));
        assert!(!limiter.check(ip2));
    }

    #[test]
    fn security_config_disabled_has_no_auth() {
        let config = SecurityConfig::disabled();
        assert!(config.api_key.is_none());
        assert!(config.cors_origins.is_none());
        assert!(config.rate_limiter.is_none());
    }

    #[test]
    fn rate_limiter_cleanup_drops_idle_clients() {
        let limiter = RateLimiter::new(2, Duration::from_millis(1));
        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        assert!(limiter.check(ip));

        std::thread::sleep(Duration::from_millis(5));
        limiter.cleanup();
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
    }

    #[test]
    fn client_ip_prefers_forwarded_header() {
        let request = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .header("X-Real-IP", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_client_ip(&request), "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn client_ip_defaults_to_localhost() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_client_ip(&request), IpAddr::from([127, 0, 0, 1]));
    }

    #[test]
    fn server_config_without_key_has_no_rate_limit() {
        let config = SecurityConfig::from_server_config(&ServerConfig::default());
        assert!(config.api_key.is_none());
        assert!(config.rate_limiter.is_none());
    }

    #[test]
    fn server_config_with_key_enables_rate_limit() {
        let server = ServerConfig {
            api_key: Some("k".to_string()),
            ..ServerConfig::default()
        };
        let config = SecurityConfig::from_server_config(&server);
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert!(config.rate_limiter.is_some());
    }

    #[test]
    fn security_config_with_api_key_has_auth() {
        let config = SecurityConfig::with_api_key("test-key");
        assert_eq!(config.api_key, Some("test-key".to_string()));
    }
}
