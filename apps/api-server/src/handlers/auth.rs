//! Token endpoints: account registration and credential exchange.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use blog_core::DomainError;
use blog_core::domain::NewUser;
use blog_core::error::RepoError;
use blog_core::ports::{AuthError, PasswordService, TokenService};
use blog_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::{AuthenticationError, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let username = req.username.trim().to_string();

    if username.is_empty() {
        return Err(AppError::BadRequest("Username may not be blank".to_string()));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash = password_service.hash(&req.password).map_err(internal)?;

    let user = state
        .users
        .insert(NewUser::new(username, password_hash))
        .await
        .map_err(|e| match e {
            RepoError::Constraint(_) => {
                AppError::from(DomainError::Duplicate("Username already registered".to_string()))
            }
            other => other.into(),
        })?;
    tracing::info!(user_id = user.id, "User registered");

    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(internal)?;

    Ok(HttpResponse::Created().json(auth_response(token, token_service.get_ref())))
}

/// POST /api/auth/token
pub async fn token(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let req = body.into_inner();
    let invalid = || AuthenticationError(AuthError::InvalidCredentials);

    let user = state
        .users
        .find_by_username(req.username.trim())
        .await
        .map_err(AppError::from)?
        .ok_or_else(invalid)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(internal)?;

    if !valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid().into());
    }

    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(internal)?;

    Ok(HttpResponse::Ok().json(auth_response(token, token_service.get_ref())))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse {
        id: identity.principal.user_id,
        username: identity.principal.username,
    }))
}

fn auth_response(access_token: String, token_service: &Arc<dyn TokenService>) -> AuthResponse {
    AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    }
}

fn internal(err: AuthError) -> AppError {
    DomainError::Internal(err.to_string()).into()
}
