//! JWT token utilities for authentication.
//!
//! Provides signed, expiring tokens carrying a subject identifier. The
//! application runs two codec instances — one for short-lived access tokens,
//! one for refresh tokens — each with its own secret and lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::errors::{ServiceError, ServiceResult};

/// JWT claims: the subject (user id) plus issue and expiry timestamps.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Signs and verifies compact, tamper-evident tokens with a fixed secret
/// and time-to-live.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // No leeway: a two-minute token expires in exactly two minutes.
        validation.leeway = 0;

        TokenCodec {
            encoding_key,
            decoding_key,
            validation,
            ttl_secs,
        }
    }

    /// Issues a signed token for `subject` expiring `ttl_secs` from now.
    pub fn issue(&self, subject: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_secs);

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::Error::new(e).context("Token generation failed").into())
    }

    /// Verifies the signature and expiry of a token and returns its claims.
    ///
    /// # Errors
    /// `ServiceError::TokenExpired` when the clock has passed the embedded
    /// expiry; `ServiceError::TokenInvalid` on a bad signature, a token
    /// signed with a different secret, or malformed input.
    pub fn verify(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::token_invalid(e.to_string()),
            })
    }
}
