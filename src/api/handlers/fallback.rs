/*
 * Responsibility
 * - ANY /fallback: the 503 contract for callers that are redirected here
 * - Route identity comes from request extensions when the routing layer set one
 */
use axum::{body::Body, http::Request, response::IntoResponse};

use crate::services::fallback::build_fallback;
use crate::services::routing::MatchedRoute;

pub async fn fallback(req: Request<Body>) -> impl IntoResponse {
    let route = req.extensions().get::<MatchedRoute>().map(MatchedRoute::id);
    build_fallback(route)
}
