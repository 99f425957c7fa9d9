//! Upstream forwarding interface used by the proxy handler.
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, Request, Response, Uri, header},
};
use thiserror::Error;
use url::Url;

use crate::services::routing::GatewayRoute;

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Why a downstream call did not produce a response.
///
/// Everything except `RequestBody` means the route is unavailable and the
/// caller answers with the fallback payload.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream client setup failed: {0}")]
    Client(String),
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
    #[error("upstream transport error: {0}")]
    Transport(String),
    #[error("request body rejected: {0}")]
    RequestBody(String),
}

/// Sends an already-authenticated request to the backend behind `route`.
///
/// Implementations are shared across requests (`Arc<dyn Forwarder>`).
#[async_trait]
pub trait Forwarder: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn forward(
        &self,
        route: &GatewayRoute,
        req: Request<Body>,
    ) -> UpstreamResult<Response<Body>>;
}

/// Headers that describe a single hop and must not cross the gateway.
static HOP_BY_HOP: [HeaderName; 9] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
    header::CONTENT_LENGTH,
];

/// Removes the fixed hop-by-hop set plus any header named in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();
    for name in &listed {
        headers.remove(name);
    }

    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

/// Keeps scheme/host/port of the upstream and the full path + query of the request.
pub fn upstream_url(route: &GatewayRoute, uri: &Uri) -> Url {
    let mut target = route.upstream.clone();
    target.set_path(uri.path());
    target.set_query(uri.query());
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn route() -> GatewayRoute {
        GatewayRoute::new(
            "wallet-service",
            "/api/wallet",
            Url::parse("http://wallet:8081/ignored").unwrap(),
        )
    }

    #[test]
    fn keeps_path_and_query() {
        let uri: Uri = "/api/wallet/balance?currency=EUR".parse().unwrap();
        assert_eq!(
            upstream_url(&route(), &uri).as_str(),
            "http://wallet:8081/api/wallet/balance?currency=EUR"
        );
    }

    #[test]
    fn no_query_stays_without_query() {
        let uri: Uri = "/api/wallet".parse().unwrap();
        assert_eq!(
            upstream_url(&route(), &uri).as_str(),
            "http://wallet:8081/api/wallet"
        );
    }

    #[test]
    fn strips_hop_by_hop_headers_only() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert(header::HOST, HeaderValue::from_static("gateway"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer x"));
        headers.insert("x-user-code", HeaderValue::from_static("U1"));

        strip_hop_by_hop(&mut headers);

        assert_eq!(headers.len(), 2);
        assert!(headers.contains_key(header::AUTHORIZATION));
        assert!(headers.contains_key("x-user-code"));
    }

    #[test]
    fn strips_headers_named_in_connection() {
        let mut headers = HeaderMap::new();
        headers.append(
            header::CONNECTION,
            HeaderValue::from_static("close, X-Backend-Hint"),
        );
        headers.append(header::CONNECTION, HeaderValue::from_static("x-trace-hop"));
        headers.insert("x-backend-hint", HeaderValue::from_static("eu-1"));
        headers.insert("x-trace-hop", HeaderValue::from_static("3"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        strip_hop_by_hop(&mut headers);

        assert!(!headers.contains_key(header::CONNECTION));
        assert!(!headers.contains_key("x-backend-hint"));
        assert!(!headers.contains_key("x-trace-hop"));
        assert!(headers.contains_key(header::CONTENT_TYPE));
    }
}
