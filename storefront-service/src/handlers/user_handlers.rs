use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Extension, Json,
};
use log::{error, info, warn};
use pinkcart_shared::auth::{generate_token, AuthContext, AUTH_COOKIE, TOKEN_LIFETIME_DAYS};
use pinkcart_shared::error::StoreError;
use pinkcart_shared::models::Role;
use pinkcart_shared::store::UserStore;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{LoginRequest, UserResponse};

// POST /admin/login
pub async fn login<S>(
    State(store): State<Arc<S>>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<serde_json::Value>)>
where
    S: UserStore,
{
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::bad_request(
            "Email and password are required".to_string(),
        ));
    }

    info!("Admin login attempt for {}", payload.email);

    let user = match store.find_user_by_email(&payload.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => {
            warn!("Login failed for {}: unknown email", payload.email);
            return Err(AppError::unauthorized("Invalid credentials".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let valid = bcrypt::verify(&payload.password, &user.password_hash).map_err(|e| {
        error!("Password verification failed: {}", e);
        AppError::internal_server_error("Internal server error".to_string())
    })?;
    if !valid {
        warn!("Login failed for {}: bad password", payload.email);
        return Err(AppError::unauthorized("Invalid credentials".to_string()));
    }

    if user.role < Role::Admin {
        warn!(
            "Login denied for {}: insufficient role {}",
            payload.email, user.role
        );
        return Err(AppError::forbidden(
            "Access denied. Admin privileges required.".to_string(),
        ));
    }

    let token = generate_token(&user.id, &user.email, user.role)?;

    // The browser client carries the session as an HTTP-only cookie; API
    // clients use the token from the body as a bearer header.
    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        AUTH_COOKIE,
        token,
        TOKEN_LIFETIME_DAYS * 24 * 60 * 60
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| {
            error!("Failed to build session cookie: {}", e);
            AppError::internal_server_error("Internal server error".to_string())
        })?,
    );

    info!("Login successful for {}", user.email);

    Ok((
        headers,
        Json(serde_json::json!({
            "user": UserResponse::from(user),
            "token": token,
            "message": "Login successful"
        })),
    ))
}

// GET /admin/me
pub async fn me(Extension(ctx): Extension<AuthContext>) -> Result<Json<serde_json::Value>> {
    ctx.require_role(Role::Admin)?;

    Ok(Json(serde_json::json!({
        "user": {
            "id": ctx.user_id,
            "email": ctx.email,
            "role": ctx.role
        }
    })))
}

// GET /admin/users
pub async fn list_users<S>(
    State(store): State<Arc<S>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>>
where
    S: UserStore,
{
    ctx.require_role(Role::SuperAdmin)?;

    let mut users = store.list_users_by_role(Role::User).await?;
    users.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(serde_json::json!({ "users": users })))
}
