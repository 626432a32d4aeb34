use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{CreateSessionRequest, SessionSubmitRequest},
    models::dto::response::{SessionCreatedResponse, SessionResponse},
};

#[post("/quiz/sessions")]
pub async fn create_session(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreateSessionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state
        .quiz_service
        .create_session(&auth.0, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(SessionCreatedResponse {
        session_id: session.id,
        question_count: session.questions.len(),
    }))
}

#[get("/quiz/sessions/{id}")]
pub async fn get_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state.quiz_service.get_session(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(&session)))
}

#[post("/quiz/sessions/{id}/submit")]
pub async fn submit_session_answer(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<SessionSubmitRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .submit_answer(&auth.0, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/quiz/sessions/{id}/questions")]
pub async fn session_questions(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let views = state.quiz_service.session_questions(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(views))
}

#[get("/quiz/my-sessions")]
pub async fn my_sessions(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let sessions = state.quiz_service.user_sessions(&auth.0).await?;
    let views: Vec<SessionResponse> = sessions.iter().map(SessionResponse::from).collect();
    Ok(HttpResponse::Ok().json(views))
}
