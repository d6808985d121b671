//! Session token issuance and verification.
//!
//! Tokens are self-contained HS256 JWTs; there is no server-side session
//! table, so a token stays valid until its `exp` passes.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::AuthSettings;
use crate::models::Role;

/// Errors raised while issuing or verifying a token
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("signature mismatch")]
    BadSignature,

    #[error("no verification key for kid {0:?}")]
    UnknownKey(Option<String>),

    #[error("token subject must not be empty")]
    EmptySubject,

    #[error("signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Claims embedded in every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Verified identity bound to a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
}

/// Source of signing and verification keys
///
/// Verification looks keys up by the token's `kid` header so that a rotating
/// implementation can keep older keys available for tokens still in flight.
pub trait KeyProvider: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    /// Key used for new tokens, with the `kid` to stamp in the header
    fn signing_key(&self) -> (Option<&str>, &EncodingKey);

    fn verification_key(&self, kid: Option<&str>) -> Option<&DecodingKey>;
}

/// Single shared-secret HS256 key
pub struct StaticKeyProvider {
    kid: Option<String>,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl StaticKeyProvider {
    pub fn from_secret(secret: &[u8], kid: Option<String>) -> Self {
        Self {
            kid,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HS256
    }

    fn signing_key(&self) -> (Option<&str>, &EncodingKey) {
        (self.kid.as_deref(), &self.encoding)
    }

    fn verification_key(&self, kid: Option<&str>) -> Option<&DecodingKey> {
        match (kid, self.kid.as_deref()) {
            (None, _) => Some(&self.decoding),
            (Some(requested), Some(own)) if requested == own => Some(&self.decoding),
            _ => None,
        }
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<dyn KeyProvider>,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(keys: Arc<dyn KeyProvider>, issuer: impl Into<String>, ttl: std::time::Duration) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::minutes(15)),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        let keys = StaticKeyProvider::from_secret(settings.jwt_secret.as_bytes(), settings.key_id.clone());
        Self::new(
            Arc::new(keys),
            settings.issuer.clone(),
            std::time::Duration::from_secs(settings.token_ttl_secs),
        )
    }

    /// Lifetime of newly issued tokens
    pub fn ttl(&self) -> std::time::Duration {
        self.ttl.to_std().unwrap_or_default()
    }

    /// Issue a token for `subject` valid from now
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, TokenError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub fn issue_at(&self, subject: &str, role: Role, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        };

        let (kid, key) = self.keys.signing_key();
        let mut header = Header::new(self.keys.algorithm());
        header.kid = kid.map(str::to_string);

        let token = encode(&header, &claims, key).map_err(TokenError::Signing)?;
        tracing::info!(subject = %claims.sub, role = %claims.role, exp = claims.exp, "Issued session token");
        Ok(token)
    }

    /// Verify signature, issuer and expiry, returning the embedded identity
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let header = decode_header(token)?;
        let key = self
            .keys
            .verification_key(header.kid.as_deref())
            .ok_or_else(|| TokenError::UnknownKey(header.kid.clone()))?;

        let mut validation = Validation::new(self.keys.algorithm());
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.set_issuer(&[self.issuer.as_str()]);

        let claims = decode::<Claims>(token, key, &validation)?.claims;

        // The library accepts exp == now; a token is dead once that second is reached.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        if claims.sub.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        Ok(Principal {
            subject: claims.sub,
            role: claims.role,
        })
    }
}
