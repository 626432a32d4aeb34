use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::QuizSession};

#[async_trait]
pub trait QuizSessionRepository: Send + Sync {
    async fn create(&self, session: QuizSession) -> AppResult<QuizSession>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizSession>>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizSession>>;
    /// Atomic conditional update of one session question's completion state.
    /// Safe under concurrent submission across server instances; returns
    /// false when the (session, question) pair no longer matches.
    async fn mark_question_answered(
        &self,
        session_id: &str,
        question_id: &str,
        correct: bool,
        answered_at: DateTime<Utc>,
    ) -> AppResult<bool>;
}

pub struct MongoQuizSessionRepository {
    collection: Collection<QuizSession>,
}

impl MongoQuizSessionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_sessions");
        Self { collection }
    }
}

#[async_trait]
impl QuizSessionRepository for MongoQuizSessionRepository {
    async fn create(&self, session: QuizSession) -> AppResult<QuizSession> {
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizSession>> {
        let session = self.collection.find_one(doc! { "id": id }).await?;
        Ok(session)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizSession>> {
        let cursor = self
            .collection
            .find(doc! { "owner_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        let sessions: Vec<QuizSession> = cursor.try_collect().await?;
        Ok(sessions)
    }

    async fn mark_question_answered(
        &self,
        session_id: &str,
        question_id: &str,
        correct: bool,
        answered_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let filter = doc! {
            "id": session_id,
            "questions.question_id": question_id,
        };
        let update = doc! {
            "$set": {
                "questions.$.answered": true,
                "questions.$.correct": correct,
                "questions.$.answered_at": answered_at.to_rfc3339(),
            }
        };

        let result = self.collection.update_one(filter, update).await?;
        Ok(result.matched_count > 0)
    }
}
