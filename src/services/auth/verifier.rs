use std::{collections::HashSet, sync::Arc};

use jsonwebtoken::{Algorithm, Validation, errors::ErrorKind};
use serde_json::{Map, Value};

use super::{claims::VerifiedClaims, error::AuthError, signing_key::SigningKey};

/// HMAC-signed compact JWS verifier.
///
/// `jsonwebtoken::Validation` is configured to:
/// - accept HS256 / HS384 / HS512 as declared by the token header
/// - check `exp` only when present, with no clock leeway
/// - reject a present `nbf` that lies in the future
/// - ignore `aud` / `iss` (not part of this gateway's contract)
#[derive(Clone)]
pub struct TokenVerifier {
    key: Arc<SigningKey>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("key", &self.key)
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(key: Arc<SigningKey>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;

        Self { key, validation }
    }

    /// Verify signature, structure and expiry, then hand back the payload.
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            self.key.decoding_key(),
            &self.validation,
        )
        .map_err(map_jwt_error)?;

        Ok(VerifiedClaims::new(data.claims))
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidToken => AuthError::Malformed,
        _ => AuthError::Invalid(err.to_string()),
    }
}
