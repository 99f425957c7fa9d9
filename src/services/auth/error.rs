//! Authentication failure taxonomy.
use thiserror::Error;

pub const MSG_MISSING_HEADER: &str = "Missing Authorization Header";
pub const MSG_INVALID_SCHEME: &str = "Invalid Authorization header format";
pub const MSG_EMPTY_TOKEN: &str = "Empty token provided";
pub const MSG_INVALID_TOKEN: &str = "Invalid or expired token";

/// Every way a request can fail authentication.
///
/// The `Display` text is for logs only. Clients only ever see
/// [`AuthError::client_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,
    #[error("authorization header does not use the Bearer scheme")]
    MalformedScheme,
    #[error("empty bearer token")]
    EmptyToken,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("missing claim: {0}")]
    MissingClaim(String),
    #[error("internal verification fault: {0}")]
    InternalVerificationFault(String),
}

impl AuthError {
    /// Message safe to return to the caller.
    ///
    /// Request-shape problems are described precisely. Everything that
    /// concerns the token itself collapses to one generic message.
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => MSG_MISSING_HEADER,
            AuthError::MalformedScheme => MSG_INVALID_SCHEME,
            AuthError::EmptyToken => MSG_EMPTY_TOKEN,
            AuthError::BadSignature
            | AuthError::Expired
            | AuthError::Malformed
            | AuthError::Invalid(_)
            | AuthError::MissingClaim(_)
            | AuthError::InternalVerificationFault(_) => MSG_INVALID_TOKEN,
        }
    }
}
