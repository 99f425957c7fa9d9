use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, Response},
};
use std::time::Duration;

use crate::services::routing::GatewayRoute;
use crate::services::upstream::client::{
    Forwarder, UpstreamError, UpstreamResult, strip_hop_by_hop, upstream_url,
};

/// reqwest-backed forwarder.
///
/// Buffers the request body up to the same limit as the inbound
/// `RequestBodyLimitLayer`; the response body is streamed back as it arrives.
/// Backend redirects are handed to the caller, never followed here, so the
/// injected `X-User-Code` only ever reaches the route's own upstream.
#[derive(Clone, Debug)]
pub struct HttpForwarder {
    client: reqwest::Client,
    body_limit: usize,
}

impl HttpForwarder {
    pub fn new(timeout: Duration, body_limit: usize) -> UpstreamResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self { client, body_limit })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else if e.is_connect() {
        UpstreamError::Unreachable(e.to_string())
    } else {
        UpstreamError::Transport(e.to_string())
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn forward(
        &self,
        route: &GatewayRoute,
        req: Request<Body>,
    ) -> UpstreamResult<Response<Body>> {
        let (parts, body) = req.into_parts();
        let target = upstream_url(route, &parts.uri);

        let body = to_bytes(body, self.body_limit)
            .await
            .map_err(|e| UpstreamError::RequestBody(e.to_string()))?;

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);

        let upstream = self
            .client
            .request(parts.method, target)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = upstream.status();
        let mut response_headers = upstream.headers().clone();
        strip_hop_by_hop(&mut response_headers);

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}
