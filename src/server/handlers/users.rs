use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password;
use crate::db::models::{NewUser, Role, UserPatch, UserProfile};
use crate::error::ApiError;
use crate::server::router::AppState;
use crate::service;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Serialize)]
pub struct UserEnvelope {
    pub message: &'static str,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/users/login (also mounted at /api/auth/login).
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = service::login(&state.users, &state.tokens, &req.email, &req.password).await?;
    info!(email = %outcome.user.email, "login successful");
    Ok(Json(LoginResponse {
        message: "Login successful",
        token: outcome.token,
        user: outcome.user,
    }))
}

/// POST /api/users. Hashes here, so the store only ever sees a digest.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "name, email and password are required".to_string(),
        ));
    }

    let password_digest = password::hash_password(&req.password).await?;
    let user = state
        .users
        .create(NewUser {
            name: req.name,
            email: req.email,
            password_digest,
            role: req.role,
        })
        .await?;

    info!(id = user.id, email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully",
            user: user.into(),
        }),
    ))
}

/// GET /api/users.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// GET /api/users/{id}.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user.into()))
}

/// PUT /api/users/{id}. A supplied password is re-hashed before it reaches
/// the store; empty strings are treated as unset, which is what the browser
/// client sends for untouched form fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let password_digest = match req.password.filter(|p| !p.is_empty()) {
        Some(plain) => Some(password::hash_password(&plain).await?),
        None => None,
    };

    let user = state
        .users
        .update(
            id,
            UserPatch {
                name: req.name.filter(|s| !s.is_empty()),
                email: req.email.filter(|s| !s.is_empty()),
                password_digest,
                role: req.role,
            },
        )
        .await?;

    Ok(Json(UserEnvelope {
        message: "User updated successfully",
        user: user.into(),
    }))
}

/// DELETE /api/users/{id}. Not idempotent; a repeat delete is a 404.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.users.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}
