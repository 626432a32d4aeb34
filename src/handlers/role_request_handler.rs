use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{CreateRoleRequestBody, RoleDecisionRequest},
    models::dto::response::MessageResponse,
};

#[post("/role-requests")]
pub async fn create_role_request(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreateRoleRequestBody>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let created = state
        .role_request_service
        .create(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

#[get("/role-requests/me")]
pub async fn my_role_requests(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let requests = state.role_request_service.my_requests(&auth.0).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[get("/role-requests/pending")]
pub async fn pending_role_requests(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let pending = state.role_request_service.pending().await?;
    Ok(HttpResponse::Ok().json(pending))
}

#[post("/role-requests/{id}/approve")]
pub async fn approve_role_request(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<RoleDecisionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state
        .role_request_service
        .approve(&auth.0, &id, request.into_inner().comment)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/role-requests/{id}/reject")]
pub async fn reject_role_request(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<RoleDecisionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    state
        .role_request_service
        .reject(&auth.0, &id, request.into_inner().comment)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Role request rejected")))
}
