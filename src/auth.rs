use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    error::ApiError,
    repository::RepositoryState,
};

/// The only role this system models. Tokens carrying anything else are rejected.
pub const ADMIN_ROLE: &str = "admin";

/// Absolute session lifetime. Expiry is fixed at issuance, not sliding.
pub const TOKEN_TTL_DAYS: i64 = 5;

/// Claims
///
/// Payload of the signed session token. Validity is entirely determined by
/// the signature and the embedded expiry; nothing is persisted server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the admin account UUID the token was issued for.
    pub sub: Uuid,
    /// Role claim, always "admin" for tokens minted by this service.
    pub role: String,
    /// Issued At (iat): seconds since the epoch at issuance.
    pub iat: usize,
    /// Expiration Time (exp): absolute cutoff after which the token is dead.
    pub exp: usize,
}

/// AdminSession
///
/// The resolved identity of an authenticated request, produced by the guard
/// extractor below and consumed by every privileged handler.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub id: Uuid,
    pub role: String,
}

/// verify_credentials
///
/// The credential verifier: looks up the account by exact email and checks
/// the supplied password against the stored bcrypt hash. Read-only.
///
/// The distinction between `InvalidEmail` and `InvalidPassword` is part of
/// the observable contract of POST /signin.
pub async fn verify_credentials(
    repo: &RepositoryState,
    email: &str,
    password: &str,
) -> Result<Uuid, ApiError> {
    if email.is_empty() {
        return Err(ApiError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ApiError::InvalidPassword);
    }

    let admin = repo
        .get_admin_by_email(email)
        .await?
        .ok_or(ApiError::InvalidEmail)?;

    // Bcrypt comparison is CPU-bound; keep it off the async executor.
    let password = password.to_owned();
    let password_hash = admin.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|e| {
            tracing::error!("password verification task failed: {:?}", e);
            ApiError::Internal
        })?
        .map_err(|e| {
            tracing::error!("password verification error: {:?}", e);
            ApiError::Internal
        })?;

    if !matches {
        return Err(ApiError::InvalidPassword);
    }

    Ok(admin.id)
}

/// issue_token
///
/// Mints a signed session token for a previously verified admin id. The
/// claims carry the id, the fixed "admin" role and an absolute expiry
/// [`TOKEN_TTL_DAYS`] from now. Pure computation; nothing is stored.
pub fn issue_token(admin_id: Uuid, secret: &str) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin_id,
        role: ADMIN_ROLE.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("token signing failed: {:?}", e);
        ApiError::Internal
    })
}

/// decode_token
///
/// Validates signature and expiry against the configured secret and checks
/// the role claim. Any failure collapses into `Unauthenticated`; the caller
/// cannot distinguish a forged token from an expired one.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::default();
    validation.validate_exp = true;

    let data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|_| ApiError::Unauthenticated)?;

    if data.claims.role != ADMIN_ROLE {
        return Err(ApiError::Unauthenticated);
    }

    Ok(data.claims)
}

/// AdminSession Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AdminSession usable as a
/// function argument in any privileged handler. The guard is purely
/// computational: signature and expiry are checked against the configured
/// secret, and the embedded identity is trusted for the token's whole
/// lifetime. The account row is deliberately NOT re-fetched here; handlers
/// that need the record look it up themselves and answer 404 if it is gone.
///
/// Rejection: `ApiError::Unauthenticated`, rendered as a 401 envelope.
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    // Allows the extractor to pull the AppConfig (for the secret and Env check).
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        // Local Development Bypass
        // In Env::Local a known admin UUID in the 'x-admin-id' header stands
        // in for a signed token. Guarded by the Env check; never active in
        // production.
        if config.env == Env::Local {
            if let Some(id_header) = parts.headers.get("x-admin-id") {
                if let Ok(id_str) = id_header.to_str() {
                    if let Ok(id) = Uuid::parse_str(id_str) {
                        return Ok(AdminSession {
                            id,
                            role: ADMIN_ROLE.to_string(),
                        });
                    }
                }
            }
        }

        // Bearer token extraction.
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthenticated)?;

        let claims = decode_token(token, &config.jwt_secret)?;

        Ok(AdminSession {
            id: claims.sub,
            role: claims.role,
        })
    }
}
