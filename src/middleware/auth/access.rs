//! Bearer token check in front of every proxied route.
//!
//! Flow per request:
//! 1. strip any client-supplied `X-User-Code` (only the gateway may set it)
//! 2. exempt path → forward unchanged
//! 3. `Authorization: Bearer <token>` → verify → `userCode` claim
//! 4. forward with `X-User-Code: <userCode>` and `AuthCtx` in extensions
//!
//! Any failure short-circuits with 401. Only request-shape problems get a
//! specific message; token problems all read "Invalid or expired token".

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";
pub const USER_CODE_HEADER: &str = "x-user-code";

/// Verified identity, available to in-process consumers via request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_code: String,
    pub role: Option<String>,
}

/// Put the bearer check in front of `router`.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let req = authenticate(&state.auth, req)?;
    Ok(next.run(req).await)
}

/// Consume the inbound request and return the one to forward, or the rejection.
pub fn authenticate<B>(auth: &AuthService, req: Request<B>) -> Result<Request<B>, AppError> {
    check(auth, req).map_err(|err| {
        match &err {
            AuthError::MissingHeader | AuthError::MalformedScheme | AuthError::EmptyToken => {
                tracing::warn!(error = %err, "rejected request without usable bearer token");
            }
            AuthError::InternalVerificationFault(_) => {
                tracing::error!(error = ?err, "authentication failed");
            }
            _ => {
                tracing::warn!(error = ?err, "access token verification failed");
            }
        }
        AppError::from(err)
    })
}

fn check<B>(auth: &AuthService, req: Request<B>) -> Result<Request<B>, AuthError> {
    let (mut parts, body) = req.into_parts();

    // Trust boundary: downstream treats this header as proof of verification.
    parts.headers.remove(USER_CODE_HEADER);

    if !auth.requires_auth(parts.uri.path()) {
        return Ok(Request::from_parts(parts, body));
    }

    let claims = {
        let token = bearer_token(&parts.headers)?;
        auth.verify(token)?
    };
    let user_code = claims.user_code()?;

    let value = HeaderValue::from_str(&user_code).map_err(|e| {
        AuthError::InternalVerificationFault(format!("userCode is not a valid header value: {e}"))
    })?;

    tracing::debug!(user_code = %user_code, "token validated");

    parts.headers.insert(USER_CODE_HEADER, value);
    parts.extensions.insert(AuthCtx {
        user_code,
        role: claims.role(),
    });

    Ok(Request::from_parts(parts, body))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let raw = match headers.get(header::AUTHORIZATION) {
        None => return Err(AuthError::MissingHeader),
        Some(value) if value.is_empty() => return Err(AuthError::MissingHeader),
        Some(value) => value.to_str().map_err(|_| AuthError::MalformedScheme)?,
    };

    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedScheme)?;

    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }

    Ok(token)
}
