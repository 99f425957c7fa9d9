/*
 * Responsibility
 * - Forward an authenticated request to its route's backend
 * - Backend unavailable (timeout / connect / transport) → 503 fallback naming the route
 */
use axum::{
    Extension,
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::middleware::auth::AuthCtx;
use crate::services::fallback::build_fallback;
use crate::services::routing::GatewayRoute;
use crate::services::upstream::UpstreamError;
use crate::state::AppState;

pub async fn proxy(
    State(state): State<AppState>,
    Extension(route): Extension<GatewayRoute>,
    req: Request<Body>,
) -> Response {
    if let Some(ctx) = req.extensions().get::<AuthCtx>() {
        tracing::debug!(route = %route.id, user_code = %ctx.user_code, "forwarding");
    }

    match state.forwarder.forward(&route, req).await {
        Ok(response) => response,
        Err(UpstreamError::RequestBody(detail)) => {
            tracing::warn!(route = %route.id, error = %detail, "request body rejected");
            AppError::BadRequest("request body could not be read").into_response()
        }
        Err(err) => {
            tracing::warn!(
                route = %route.id,
                backend = state.forwarder.backend_name(),
                error = ?err,
                "upstream unavailable, serving fallback"
            );
            build_fallback(Some(&route.id)).into_response()
        }
    }
}
