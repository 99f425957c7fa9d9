/*
 * Responsibility
 * - 503 payload returned in place of a proxied response when a route's backend is unavailable
 * - Total: any input (including no route) produces a response
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const UNKNOWN_SERVICE: &str = "Unknown Service";
pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";

/// Key names are part of the client contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackBody {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub status: &'static str,
    pub failed_service: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackResponse {
    pub status: StatusCode,
    pub body: FallbackBody,
}

pub fn build_fallback(route: Option<&str>) -> FallbackResponse {
    build_fallback_at(route, Utc::now())
}

pub fn build_fallback_at(route: Option<&str>, now: DateTime<Utc>) -> FallbackResponse {
    let failed_service = route.unwrap_or(UNKNOWN_SERVICE).to_string();
    let message = format!(
        "The {} is currently unavailable. Please try again later.",
        failed_service
    );

    FallbackResponse {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: FallbackBody {
            timestamp: now.timestamp_millis(),
            status: SERVICE_UNAVAILABLE,
            failed_service,
            message,
        },
    }
}

impl IntoResponse for FallbackResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
