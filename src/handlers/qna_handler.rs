use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_roles, AuthenticatedUser, Claims},
    errors::AppError,
    models::domain::UserRole,
    models::dto::request::{
        CreateQuestionRequest, ListQuestionsQuery, SubmitAnswersRequest, UpdateAnswerRequest,
        UpdateQuestionRequest,
    },
    models::dto::response::{GradingResponse, MessageResponse, QuestionView},
};

/// Solvers only ever see the masked view; the answer key is reserved for
/// the people who maintain the question bank.
fn reveal_key(claims: &Claims) -> bool {
    claims.is_admin || claims.role == UserRole::Creator
}

#[post("/qna/questions")]
pub async fn create_question(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_roles(&auth.0, &[UserRole::Creator, UserRole::Admin])?;

    let question = state
        .qna_service
        .create_question(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(QuestionView::from_question(&question, true)))
}

#[get("/qna/questions")]
pub async fn list_questions(
    state: web::Data<Arc<AppState>>,
    query: web::Query<ListQuestionsQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let questions = state
        .qna_service
        .list_questions(query.category_id, query.skip, query.limit)
        .await?;

    let reveal = reveal_key(&auth.0);
    let views: Vec<QuestionView> = questions
        .iter()
        .map(|q| QuestionView::from_question(q, reveal))
        .collect();
    Ok(HttpResponse::Ok().json(views))
}

#[get("/qna/questions/{id}")]
pub async fn get_question(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state.qna_service.get_question(&id).await?;
    Ok(HttpResponse::Ok().json(QuestionView::from_question(
        &question,
        reveal_key(&auth.0),
    )))
}

#[put("/qna/questions/{id}")]
pub async fn update_question(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<UpdateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .qna_service
        .update_question(&auth.0, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuestionView::from_question(&question, true)))
}

#[put("/qna/answers/{id}")]
pub async fn update_answer(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<UpdateAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .qna_service
        .update_answer(&auth.0, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuestionView::from_question(&question, true)))
}

#[delete("/qna/questions/{id}")]
pub async fn delete_question(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.qna_service.delete_question(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Question deleted")))
}

/// Standalone grading outside a quiz session. Still writes a score record.
#[post("/qna/submit")]
pub async fn submit_answers(
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
