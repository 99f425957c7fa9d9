/*
 * Responsibility
 * - Gateway URL structure
 * - /health, /fallback are served locally (no auth, no proxy)
 * - everything else: route match → bearer auth → proxy
 */
use axum::{
    Router,
    routing::{any, get},
};

use crate::api::handlers::{fallback::fallback, health::health, proxy::proxy};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    let proxied = Router::new().fallback(proxy);
    // Last applied runs first: route matching precedes authentication.
    let proxied = middleware::auth::access::apply(proxied, state.clone());
    let proxied = middleware::route::apply(proxied, state.clone());

    Router::new()
        .route("/health", get(health))
        .route("/fallback", any(fallback))
        .fallback_service(proxied.with_state(state))
}
