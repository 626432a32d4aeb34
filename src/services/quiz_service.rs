use std::sync::Arc;

use chrono::Utc;

use crate::{
    auth::{require_owner_or_admin, Claims},
    errors::{AppError, AppResult},
    models::domain::QuizSession,
    models::dto::request::{CreateSessionRequest, SessionSubmitRequest},
    models::dto::response::{GradingResponse, SessionQuestionView},
    repositories::{CategoryRepository, QuestionRepository, QuizSessionRepository},
    services::score_service::ScoreService,
};
use validator::Validate;

pub struct QuizService {
    sessions: Arc<dyn QuizSessionRepository>,
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
    scores: Arc<ScoreService>,
    default_question_count: i64,
}

impl QuizService {
    pub fn new(
        sessions: Arc<dyn QuizSessionRepository>,
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
        scores: Arc<ScoreService>,
        default_question_count: i64,
    ) -> Self {
        Self {
            sessions,
            questions,
            categories,
            scores,
            default_question_count,
        }
    }

    /// Draws a random selection of questions from the category. When the
    /// category holds fewer questions than requested, the session simply
    /// contains all of them.
    pub async fn create_session(
        &self,
        claims: &Claims,
        request: CreateSessionRequest,
    ) -> AppResult<QuizSession> {
        request.validate()?;

        self.categories
            .find_by_id(&request.category_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Category with id '{}' not found",
                    request.category_id
                ))
            })?;

        let count = request.question_count.unwrap_or(self.default_question_count);
        if count < 1 {
            return Err(AppError::Validation(
                "question_count must be at least 1".to_string(),
            ));
        }

        let sampled = self
            .questions
            .sample_by_category(&request.category_id, count)
            .await?;

        let question_ids: Vec<String> = sampled.iter().map(|q| q.id.clone()).collect();
        let session = QuizSession::new(
            &request.category_id,
            &claims.user_id,
            &request.name,
            request.description,
            &question_ids,
        );

        let session = self.sessions.create(session).await?;
        log::info!(
            "Created quiz session {} for user {} with {} questions",
            session.id,
            claims.user_id,
            session.questions.len()
        );

        Ok(session)
    }

    pub async fn get_session(&self, claims: &Claims, id: &str) -> AppResult<QuizSession> {
        let session = self
            .sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz session with id '{}' not found", id)))?;

        require_owner_or_admin(claims, &session.owner_id)?;
        Ok(session)
    }

    pub async fn user_sessions(&self, claims: &Claims) -> AppResult<Vec<QuizSession>> {
        self.sessions.find_by_user(&claims.user_id).await
    }

    /// Grades one answer inside a session. The score record is written first;
    /// marking the session question is a separate single-document update, so a
    /// concurrent resubmission can at worst re-mark an already-answered entry.
    pub async fn submit_answer(
        &self,
        claims: &Claims,
        session_id: &str,
        request: SessionSubmitRequest,
    ) -> AppResult<GradingResponse> {
        let session = self.get_session(claims, session_id).await?;

        if !session.contains_question(&request.question_id) {
            return Err(AppError::Validation(format!(
                "Question '{}' is not part of session '{}'",
                request.question_id, session_id
            )));
        }

        let (grading, score_id) = self
            .scores
            .record_answer(&claims.user_id, &request.question_id, &request.selected_answer_ids)
            .await?;

        let marked = self
            .sessions
            .mark_question_answered(
                session_id,
                &request.question_id,
                grading.is_correct,
                Utc::now(),
            )
            .await?;
        if !marked {
            log::warn!(
                "Session {} question {} vanished before completion update",
                session_id,
                request.question_id
            );
        }

        Ok(GradingResponse::new(grading, score_id).in_session(session_id))
    }

    /// Full question details for a session, with the answer key masked on
    /// questions the user has not answered yet.
    pub async fn session_questions(
        &self,
        claims: &Claims,
        session_id: &str,
    ) -> AppResult<Vec<SessionQuestionView>> {
        let session = self.get_session(claims, session_id).await?;

        let mut views = Vec::with_capacity(session.questions.len());
        for sq in &session.questions {
            match self.questions.find_by_id(&sq.question_id).await? {
                Some(question) => views.push(SessionQuestionView::new(sq, &question)),
                // The question was deleted after the session was created.
                None => log::warn!(
                    "Question {} referenced by session {} no longer exists",
                    sq.question_id,
                    session_id
                ),
            }
        }

        Ok(views)
    }
}
