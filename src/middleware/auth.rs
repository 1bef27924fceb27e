use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use model::entities::user::{self, UserType};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::schemas::AppState;

/// JWT payload issued on register and login.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub user_id: i32,
    pub email: String,
    pub user_type: String,
    pub exp: usize,
}

/// Sign a token for `user` that expires after the configured lifetime.
pub fn issue_token(user: &user::Model, auth: &AuthConfig) -> Result<String, ApiError> {
    let expires_at = Utc::now() + auth.token_ttl;
    let claims = Claims {
        sub: user.id.to_string(),
        user_id: user.id,
        email: user.email.clone(),
        user_type: user.user_type.as_str().to_string(),
        exp: expires_at.timestamp().max(0) as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(token: &str, auth: &AuthConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// The caller behind a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub user_type: UserType,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        trace!("Authenticating request to {}", parts.uri.path());

        let Some(token) = bearer_token(parts) else {
            warn!("Missing bearer token for {}", parts.uri.path());
            return Err(ApiError::Unauthorized("Access token required".to_string()));
        };

        let claims = match decode_token(token, &state.auth) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Rejected token for {}: {}", parts.uri.path(), e);
                return Err(ApiError::Forbidden("Invalid or expired token".to_string()));
            }
        };

        let Ok(user_type) = claims.user_type.parse::<UserType>() else {
            warn!("Token carries unknown user type '{}'", claims.user_type);
            return Err(ApiError::Forbidden("Invalid or expired token".to_string()));
        };

        debug!("Authenticated user {} ({})", claims.user_id, claims.email);
        Ok(AuthUser {
            id: claims.user_id,
            email: claims.email,
            user_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> user::Model {
        user::Model {
            id: 7,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "hash".to_string(),
            phone: None,
            location: Some("Cuttack".to_string()),
            user_type: UserType::Farmer,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_issued_token_decodes_to_same_claims() {
        let auth = AuthConfig::new(Some("test-secret".to_string()), 1, 4).unwrap();
        let token = issue_token(&sample_user(), &auth).unwrap();

        let claims = decode_token(&token, &auth).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "asha@example.com");
        assert_eq!(claims.user_type, "farmer");
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let signer = AuthConfig::new(Some("one-secret".to_string()), 1, 4).unwrap();
        let verifier = AuthConfig::new(Some("another-secret".to_string()), 1, 4).unwrap();
        let token = issue_token(&sample_user(), &signer).unwrap();

        assert!(decode_token(&token, &verifier).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut auth = AuthConfig::new(Some("test-secret".to_string()), 1, 4).unwrap();
        auth.token_ttl = Duration::hours(-2);
        let token = issue_token(&sample_user(), &auth).unwrap();

        assert!(decode_token(&token, &auth).is_err());
    }
}
