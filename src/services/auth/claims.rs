use serde_json::{Map, Value};

use super::error::AuthError;

pub const USER_CODE_CLAIM: &str = "userCode";
pub const ROLE_CLAIM: &str = "role";

/// Payload of a token whose signature and expiry have been checked.
///
/// Only [`TokenVerifier`](super::verifier::TokenVerifier) builds this type,
/// and nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedClaims(Map<String, Value>);

impl VerifiedClaims {
    pub(crate) fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Identity code forwarded downstream. Required.
    pub fn user_code(&self) -> Result<String, AuthError> {
        get_claim(self, USER_CODE_CLAIM)
    }

    /// Role claim, if the issuer put one in.
    pub fn role(&self) -> Option<String> {
        get_claim(self, ROLE_CLAIM).ok()
    }
}

/// String-typed claim lookup. Absent or non-string values are both `MissingClaim`.
pub fn get_claim(claims: &VerifiedClaims, name: &str) -> Result<String, AuthError> {
    match claims.0.get(name) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(AuthError::MissingClaim(name.to_string())),
    }
}
