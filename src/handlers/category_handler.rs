use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{CreateCategoryRequest, UpdateCategoryRequest},
    models::dto::response::MessageResponse,
};

#[post("/categories")]
pub async fn create_category(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let category = state
        .category_service
        .create(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[get("/categories")]
pub async fn list_categories(
    state: web::Data<Arc<AppState>>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let categories = state.category_service.list().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let category = state.category_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let category = state
        .category_service
        .update(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    state.category_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Category deleted")))
}
