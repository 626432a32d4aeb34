use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::score::{ScoreRecord, ScoreSummary},
    repositories::{QuestionRepository, ScoreRepository},
    services::grading::{grade, Grading},
};

const DEFAULT_HISTORY_LIMIT: i64 = 100;

pub struct ScoreService {
    questions: Arc<dyn QuestionRepository>,
    scores: Arc<dyn ScoreRepository>,
}

impl ScoreService {
    pub fn new(questions: Arc<dyn QuestionRepository>, scores: Arc<dyn ScoreRepository>) -> Self {
        Self { questions, scores }
    }

    /// Grades a submission and appends it to the user's score history.
    pub async fn record_answer(
        &self,
        user_id: &str,
        question_id: &str,
        selected_ids: &[String],
    ) -> AppResult<(Grading, String)> {
        let question = self
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Question with id '{}' not found", question_id))
            })?;

        let grading = grade(question.arity, &question.answers, selected_ids)?;

        let record = ScoreRecord::new(
            user_id,
            question_id,
            &question.category_id,
            grading.is_correct,
            selected_ids.to_vec(),
        );
        let record = self.scores.create(record).await?;

        log::info!(
            "Recorded answer for user {} on question {}: {}",
            user_id,
            question_id,
            if grading.is_correct { "correct" } else { "incorrect" }
        );

        Ok((grading, record.id))
    }

    pub async fn history(&self, user_id: &str, limit: Option<i64>) -> AppResult<Vec<ScoreRecord>> {
        self.scores
            .find_by_user(user_id, limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await
    }

    pub async fn summary(&self, user_id: &str) -> AppResult<ScoreSummary> {
        let stats = self.scores.category_stats(user_id).await?;
        Ok(ScoreSummary::from_stats(stats))
    }
}
