//! Route matching stage.
//!
//! Runs before authentication: resolves the backend route for the request path
//! and attaches both `MatchedRoute` (identity) and `GatewayRoute` (target) to the
//! request extensions. Unknown paths end here with 404.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::routing::MatchedRoute;
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, route_middleware))
}

async fn route_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    let Some(route) = state.routes.match_path(path).cloned() else {
        tracing::debug!(path = %path, "no route matched");
        return Err(AppError::NotFound {
            path: path.to_string(),
        });
    };

    req.extensions_mut().insert(MatchedRoute(route.id.clone()));
    req.extensions_mut().insert(route);

    Ok(next.run(req).await)
}
