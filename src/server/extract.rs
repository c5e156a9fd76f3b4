use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::token::Claims;
use crate::error::ApiError;
use crate::server::router::AppState;

/// Extractor for routes that require a valid session.
///
/// Pulls the bearer token from `Authorization` and authenticates it with the
/// same issuer that minted it; the verified claims are handed to the
/// handler. Rejection is 401 for a missing header, 401 for a bad token.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl FromRequestParts<AppState> for AuthClaims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let auth = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let auth = auth.trim();
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::MissingToken)?;

        let claims = state.tokens.verify(token)?;
        Ok(Self(claims))
    }
}
