/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, KeyError, RouteClassifier, SigningKey};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, KeyError> {
    let key = SigningKey::from_base64_secret(&config.jwt_secret)?;
    let classifier = RouteClassifier::new(config.auth_open_paths.iter().cloned());

    Ok(Arc::new(AuthService::new(classifier, Arc::new(key))))
}
