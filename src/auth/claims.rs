//! Session token verification.
//!
//! Sessions are HS256 JWTs whose `sub` claim is the user's UUID. Any
//! token that fails signature, expiry or subject parsing is treated as
//! "no session" rather than an error: the access gate turns that into a
//! login redirect.

use std::fmt;

use axum::extract::Query;
use axum::http::header;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::error::AdminError;

/// Query parameter accepted in place of the `Authorization` header, for
/// clients that cannot set headers (WebSocket upgrades from browsers).
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: String,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<u64>,
    /// Email, when the identity provider includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Verifies (and, for tooling and tests, issues) session tokens.
pub struct TokenVerifier {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Creates a verifier for tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Hosted identity providers stamp their own audience; only the
        // signature, expiry and subject matter here.
        validation.validate_aud = false;
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Returns the user id of a valid token, `None` otherwise.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<UserId> {
        match decode::<SessionClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims.sub.parse().ok(),
            Err(e) => {
                tracing::debug!(error = %e, "rejected session token");
                None
            }
        }
    }

    /// Resolves the session user of a request, if any.
    #[must_use]
    pub fn verify_parts(&self, parts: &Parts) -> Option<UserId> {
        token_from_parts(parts).and_then(|token| self.verify(&token))
    }

    /// Signs a token for `user` valid for `ttl_secs` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Internal`] if signing fails.
    pub fn issue(&self, user: UserId, ttl_secs: u64) -> Result<String, AdminError> {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let claims = SessionClaims {
            sub: user.to_string(),
            exp: now.saturating_add(ttl_secs),
            iat: Some(now),
            email: None,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AdminError::Internal(format!("token signing failed: {e}")))
    }
}

/// Extracts the raw token from `Authorization: Bearer …` or the
/// [`ACCESS_TOKEN_PARAM`] query parameter.
#[must_use]
pub fn token_from_parts(parts: &Parts) -> Option<String> {
    let from_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            v.strip_prefix("Bearer ")
                .or_else(|| v.strip_prefix("bearer "))
        })
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = from_header {
        return Some(token.to_string());
    }

    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(query)| query.access_token)
        .filter(|t| !t.is_empty())
}

/// Query string carrying [`ACCESS_TOKEN_PARAM`].
#[derive(Debug, Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}
