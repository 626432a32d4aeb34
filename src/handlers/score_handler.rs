use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{HistoryQuery, SubmitAnswersRequest},
    models::dto::response::GradingResponse,
};

#[post("/scores/submit")]
pub async fn submit_score(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SubmitAnswersRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let (grading, score_id) = state
        .score_service
        .record_answer(
            &auth.0.user_id,
            &request.question_id,
            &request.selected_answer_ids,
        )
        .await?;

    Ok(HttpResponse::Ok().json(GradingResponse::new(grading, score_id)))
}

#[get("/scores/history")]
pub async fn score_history(
    state: web::Data<Arc<AppState>>,
    query: web::Query<HistoryQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let records = state
        .score_service
        .history(&auth.0.user_id, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(records))
}

#[get("/scores/summary")]
pub async fn score_summary(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let summary = state.score_service.summary(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(summary))
}
