//! HMAC key material shared by every verification in the process.
use base64::{Engine, engine::general_purpose::STANDARD};
use jsonwebtoken::DecodingKey;
use thiserror::Error;

/// HMAC-SHA256 needs at least 256 bits of key.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("signing secret is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("signing secret is {bits} bits, at least {min} required", min = MIN_SECRET_BYTES * 8)]
    TooShort { bits: usize },
}

/// Symmetric key derived from the configured secret.
///
/// Built once at startup and only ever read afterwards.
#[derive(Clone)]
pub struct SigningKey {
    decoding_key: DecodingKey,
    len: usize,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("SigningKey")
            .field("bits", &(self.len * 8))
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    /// `secret` is standard (padded) base64.
    pub fn from_base64_secret(secret: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD.decode(secret.trim())?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(KeyError::TooShort {
                bits: bytes.len() * 8,
            });
        }

        Ok(Self {
            decoding_key: DecodingKey::from_secret(bytes),
            len: bytes.len(),
        })
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
