#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, Response, StatusCode},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;
use url::Url;

use gateway_auth::app::build_router;
use gateway_auth::middleware::http::HttpLimits;
use gateway_auth::services::auth::{AuthService, RouteClassifier, SigningKey};
use gateway_auth::services::routing::{GatewayRoute, RouteTable};
use gateway_auth::services::upstream::{Forwarder, UpstreamError, UpstreamResult};
use gateway_auth::state::AppState;

pub const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
pub const OTHER_SECRET: &[u8] = b"fedcba9876543210fedcba9876543210";

#[derive(Debug, Clone)]
pub struct Forwarded {
    pub route_id: String,
    pub path: String,
    pub headers: HeaderMap,
}

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Respond,
    TimeOut,
    Refuse,
}

/// Stands in for the backends: records what reached it.
#[derive(Debug)]
pub struct RecordingForwarder {
    behaviour: Behaviour,
    seen: Mutex<Vec<Forwarded>>,
}

impl RecordingForwarder {
    pub fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<Forwarded> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Forwarder for RecordingForwarder {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    async fn forward(
        &self,
        route: &GatewayRoute,
        req: Request<Body>,
    ) -> UpstreamResult<Response<Body>> {
        self.seen.lock().unwrap().push(Forwarded {
            route_id: route.id.clone(),
            path: req.uri().path().to_string(),
            headers: req.headers().clone(),
        });

        match self.behaviour {
            Behaviour::Respond => {
                let mut res = Response::new(Body::from(format!("hello from {}", route.id)));
                *res.status_mut() = StatusCode::OK;
                Ok(res)
            }
            Behaviour::TimeOut => Err(UpstreamError::Timeout),
            Behaviour::Refuse => Err(UpstreamError::Unreachable("connection refused".into())),
        }
    }
}

pub fn auth_service() -> Arc<AuthService> {
    Arc::new(AuthService::new(
        RouteClassifier::new([
            "/api/user",
            "/api/auth/login",
            "/api/auth/refresh",
            "api/users/search",
        ]),
        Arc::new(SigningKey::from_bytes(SECRET).unwrap()),
    ))
}

pub fn route_table() -> Arc<RouteTable> {
    let upstream = Url::parse("http://backend.invalid:8080").unwrap();
    Arc::new(RouteTable::new(vec![
        GatewayRoute::new("wallet-service", "/api/wallet", upstream.clone()),
        GatewayRoute::new("reward-service", "/api/reward", upstream.clone()),
        GatewayRoute::new("user-service", "/api/user", upstream.clone()),
        GatewayRoute::new("auth-service", "/api/auth", upstream),
    ]))
}

pub fn gateway(forwarder: Arc<RecordingForwarder>) -> Router {
    let state = AppState::new(auth_service(), route_table(), forwarder);
    build_router(state, HttpLimits::default())
}

pub fn token(secret: &[u8], claims: &Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
