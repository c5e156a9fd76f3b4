use crate::db::models::{Role, User};
use crate::error::ApiError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Identity claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub exp: i64,
}

/// Issues and authenticates signed session tokens (HS256 JWTs).
///
/// The token is the entire session: `verify` is pure computation over the
/// token string and the server secret, with no store round-trip. A token is
/// valid until its embedded expiry elapses; there is no revocation.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Issuer with the default one-day session lifetime.
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::days(1))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Mint a token for `user`, expiring `ttl` from now.
    pub fn issue(&self, user: &User) -> Result<String, ApiError> {
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(ApiError::TokenIssue)
    }

    /// Authenticate a re-presented token.
    ///
    /// Signature and expiry are checked with zero leeway; a failure of either
    /// check, or a malformed token, collapses to [`ApiError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::InvalidToken)
    }
}
