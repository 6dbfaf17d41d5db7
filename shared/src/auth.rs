use std::env;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::models::Role;

/// Cookie set by the admin login flow; bearer headers take precedence.
pub const AUTH_COOKIE: &str = "auth-token";
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

const DEFAULT_SECRET: &str = "pinkcart-dev-secret";

fn jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string())
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Access denied. {0} privileges required.")]
    Forbidden(Role),

    #[error("Failed to create token: {0}")]
    TokenCreation(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Identity resolved by `auth_middleware`, attached to the request extensions.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl AuthContext {
    /// Role gate for privileged handlers. USER < ADMIN < SUPER_ADMIN.
    pub fn require_role(&self, min: Role) -> Result<&AuthContext, AuthError> {
        if self.role >= min {
            Ok(self)
        } else {
            Err(AuthError::Forbidden(min))
        }
    }
}

pub fn generate_token(user_id: &str, email: &str, role: Role) -> Result<String, AuthError> {
    generate_token_with_lifetime(user_id, email, role, Duration::days(TOKEN_LIFETIME_DAYS))
}

pub fn generate_token_with_lifetime(
    user_id: &str,
    email: &str,
    role: Role,
    lifetime: Duration,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: (now + lifetime).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_ref()),
    )
    .map_err(|e| AuthError::TokenCreation(e.to_string()))
}

pub fn verify_token(token: &str) -> Result<AuthContext, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    Ok(AuthContext {
        user_id: data.claims.sub,
        email: data.claims.email,
        role: data.claims.role,
    })
}

fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.trim().to_string());
        }
    }

    let cookies = headers.get(header::COOKIE).and_then(|v| v.to_str().ok())?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.to_string())
}

/// Rejects requests without a valid session token and attaches the decoded
/// `AuthContext` for downstream handlers. There is no server-side revocation
/// list; sign-out is client-side token disposal.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    let result = token_from_headers(req.headers())
        .ok_or(AuthError::MissingToken)
        .and_then(|token| verify_token(&token));

    match result {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(err) => {
            warn!("Rejected request to {}: {}", req.uri(), err);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// Builds a request carrying a freshly signed token, for router tests.
pub fn create_test_request(
    method: &str,
    uri: &str,
    user_id: &str,
    role: Role,
    body: Option<serde_json::Value>,
) -> Request {
    let token = generate_token(user_id, &format!("{}@test.local", user_id), role)
        .expect("failed to sign test token");
    request_with_bearer(method, uri, Some(&token), body)
}

/// Builds a request with an explicit (or absent) bearer token.
pub fn request_with_bearer(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request {
    let mut builder = http::Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let token = generate_token("user-1", "user-1@test.local", Role::Admin).unwrap();
        let ctx = verify_token(&token).unwrap();
        assert_eq!(ctx.user_id, "user-1");
        assert_eq!(ctx.email, "user-1@test.local");
        assert_eq!(ctx.role, Role::Admin);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Well past the default validation leeway.
        let token = generate_token_with_lifetime(
            "user-1",
            "user-1@test.local",
            Role::Admin,
            Duration::hours(-2),
        )
        .unwrap();
        assert!(matches!(verify_token(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn require_role_gates_by_privilege() {
        let ctx = AuthContext {
            user_id: "u".to_string(),
            email: "u@test.local".to_string(),
            role: Role::User,
        };
        assert!(matches!(
            ctx.require_role(Role::Admin),
            Err(AuthError::Forbidden(Role::Admin))
        ));

        let admin = AuthContext { role: Role::Admin, ..ctx.clone() };
        assert!(admin.require_role(Role::Admin).is_ok());
        assert!(admin.require_role(Role::User).is_ok());
        assert!(matches!(
            admin.require_role(Role::SuperAdmin),
            Err(AuthError::Forbidden(Role::SuperAdmin))
        ));

        let super_admin = AuthContext { role: Role::SuperAdmin, ..ctx };
        assert!(super_admin.require_role(Role::Admin).is_ok());
    }

    #[test]
    fn cookie_token_is_accepted() {
        let token = generate_token("user-2", "user-2@test.local", Role::SuperAdmin).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("theme=dark; {}={}", AUTH_COOKIE, token).parse().unwrap(),
        );
        assert_eq!(token_from_headers(&headers), Some(token));
    }
}
