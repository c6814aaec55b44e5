use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::http::{header, HeaderMap};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use model::entities::user;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Immutable token-signing configuration shared by all requests.
#[derive(Clone)]
pub struct AuthConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: TimeDelta,
}

impl AuthConfig {
    pub fn new(secret: &str, token_ttl: TimeDelta) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
        }
    }

    /// Build the configuration from `JWT_SECRET` and `TOKEN_TTL_SECS`.
    ///
    /// Tokens expire after 24 hours unless `TOKEN_TTL_SECS` overrides it.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET is not set, using an insecure default");
            "insecure-dev-secret".to_string()
        });

        let ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(86_400);

        Self::new(&secret, TimeDelta::seconds(ttl_secs))
    }
}

/// JWT claims carried by a login token.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    /// Username of the authenticated user.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn issue(username: &str, token_ttl: TimeDelta) -> Self {
        let now = Utc::now();
        Self {
            sub: username.to_string(),
            exp: (now + token_ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Signs a login token for the given username.
pub fn encode_token(config: &AuthConfig, username: &str) -> Result<String, ApiError> {
    let claims = Claims::issue(username, config.token_ttl);
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &config.encoding_key)
        .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
}

/// Verifies signature and expiry, returning the claims on success.
///
/// Expiry is checked with a 30 second leeway. Every failure mode maps
/// to `None`; callers treat an unverifiable token as anonymous.
pub fn decode_token(config: &AuthConfig, token: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 30;
    validation.validate_exp = true;

    match jsonwebtoken::decode::<Claims>(token, &config.decoding_key, &validation) {
        Ok(data) => Some(data.claims),
        Err(error) => {
            match error.kind() {
                ErrorKind::ExpiredSignature => warn!("Rejected expired token"),
                kind => debug!("Rejected invalid token: {:?}", kind),
            }
            None
        }
    }
}

/// Extracts the token from an `Authorization` header.
///
/// Clients send the `JWT <token>` scheme; the conventional
/// `Bearer <token>` is accepted as well.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("JWT ")
        .or_else(|| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Resolves the request's user from the `Authorization` header.
///
/// Infallible by design of the wire contract: a missing header, bad
/// token, or unknown username all resolve to anonymous rather than an
/// error. Only unexpected database failures are logged.
pub async fn resolve_user(
    db: &DatabaseConnection,
    config: &AuthConfig,
    headers: &HeaderMap,
) -> Option<user::Model> {
    let token = bearer_token(headers)?;
    let claims = decode_token(config, token)?;

    match user::Entity::find()
        .filter(user::Column::Username.eq(&claims.sub))
        .one(db)
        .await
    {
        Ok(Some(found)) => {
            debug!("Resolved request user: {}", found.username);
            Some(found)
        }
        Ok(None) => {
            debug!("Token subject '{}' has no user row", claims.sub);
            None
        }
        Err(e) => {
            warn!("Failed to load user for token subject '{}': {}", claims.sub, e);
            None
        }
    }
}

/// The user resolved for the current request, injected into the
/// GraphQL context by the HTTP handler. `None` means anonymous.
#[derive(Clone)]
pub struct CurrentUser(pub Option<user::Model>);

/// Hashes a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {e}")))
}

/// Verifies a password against a stored PHC string.
///
/// A malformed stored hash counts as a failed verification.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::new("test-secret", TimeDelta::hours(1))
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn token_round_trip() {
        let config = test_config();
        let token = encode_token(&config, "alice").unwrap();
        let claims = decode_token(&config, &token).expect("token should verify");
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let token = encode_token(&config, "alice").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(decode_token(&config, &tampered).is_none());

        let other = AuthConfig::new("another-secret", TimeDelta::hours(1));
        assert!(decode_token(&other, &token).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Expired well beyond the 30s leeway
        let config = AuthConfig::new("test-secret", TimeDelta::hours(-1));
        let token = encode_token(&config, "alice").unwrap();
        assert!(decode_token(&config, &token).is_none());
    }

    #[test]
    fn bearer_token_accepts_both_schemes() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("JWT abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}
