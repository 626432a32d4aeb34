use std::str::FromStr;
use std::sync::Arc;

use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::domain::UserRole,
    models::dto::request::{LoginRequest, RegisterRequest, UpdateProfileRequest, UserListQuery},
    models::dto::response::{AuthResponse, MessageResponse, UserResponse},
};

#[post("/auth/register")]
pub async fn register(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;
    let token = state.auth_gate.issue(&user)?;

    Ok(HttpResponse::Created().json(AuthResponse::new(token, &user)))
}

#[post("/auth/login")]
pub async fn login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let user = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await?;
    let token = state.auth_gate.issue(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse::new(token, &user)))
}

/// Same credential check as `login`, but only admins get a token back.
#[post("/auth/admin/login")]
pub async fn admin_login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let user = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await?;

    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Admin privileges required".to_string(),
        ));
    }

    let token = state.auth_gate.issue(&user)?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(token, &user)))
}

/// Revokes only the token presented with this request; other sessions of
/// the same user stay valid.
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.auth_gate.revoke_token(&auth.0, "logout").await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out")))
}

#[get("/auth/me")]
pub async fn me(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_by_id(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

#[put("/auth/me")]
pub async fn update_me(
    state: web::Data<Arc<AppState>>,
    request: web::Json<UpdateProfileRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state
        .user_service
        .update_profile(&auth.0.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

#[get("/auth/admin/users")]
pub async fn list_users(
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserListQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let role = match &query.role {
        Some(raw) => Some(UserRole::from_str(raw).map_err(AppError::Validation)?),
        None => None,
    };

    let users = state.user_service.list(role).await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(users))
}

#[get("/auth/admin/users/{id}")]
pub async fn get_user(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let user = state.user_service.get_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}
