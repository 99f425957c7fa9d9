/*
 * Responsibility
 * - Gateway-wide ApiError definition
 * - IntoResponse (HTTP status / JSON error body)
 * - AuthError → 401 with a client-safe message only
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("no route for {path}")]
    NotFound { path: String },
    #[error("{0}")]
    BadRequest(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message.to_string())
            }
            AppError::NotFound { path } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("no route for {path}."),
            ),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.to_string())
            }
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Unauthorized(e.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unauthorized_carries_client_message() {
        let response = AppError::from(AuthError::EmptyToken).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_of(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "Empty token provided");
    }

    #[tokio::test]
    async fn verifier_detail_never_reaches_the_body() {
        let response =
            AppError::from(AuthError::Invalid("InvalidAlgorithm: RS256".into())).into_response();
        let body = body_of(response).await;
        assert_eq!(body["error"]["message"], "Invalid or expired token");
        assert!(!body.to_string().contains("RS256"));
    }

    #[tokio::test]
    async fn not_found_names_the_path() {
        let response = AppError::NotFound {
            path: "/nowhere".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await["error"]["code"], "NOT_FOUND");
    }
}
