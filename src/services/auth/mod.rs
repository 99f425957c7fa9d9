pub mod claims;
pub mod error;
pub mod factory;
pub mod route_classifier;
pub mod signing_key;
pub mod verifier;

use std::sync::Arc;

pub use claims::VerifiedClaims;
pub use error::AuthError;
pub use factory::build_auth_service;
pub use route_classifier::RouteClassifier;
pub use signing_key::{KeyError, SigningKey};
pub use verifier::TokenVerifier;

/// Process-wide authentication state: which paths are public, and how tokens
/// are verified. Immutable once built; shared through `Arc`.
#[derive(Debug, Clone)]
pub struct AuthService {
    classifier: RouteClassifier,
    verifier: TokenVerifier,
}

impl AuthService {
    pub fn new(classifier: RouteClassifier, key: Arc<SigningKey>) -> Self {
        Self {
            classifier,
            verifier: TokenVerifier::new(key),
        }
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        self.classifier.requires_auth(path)
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        self.verifier.verify(token)
    }

    pub fn classifier(&self) -> &RouteClassifier {
        &self.classifier
    }
}
