use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document},
    options::ReplaceOptions,
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Question,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>>;
    /// The question holding the answer with this id, if any.
    async fn find_by_answer_id(&self, answer_id: &str) -> AppResult<Option<Question>>;
    async fn find_all(
        &self,
        category_id: Option<String>,
        skip: u64,
        limit: i64,
    ) -> AppResult<Vec<Question>>;
    /// Up to `count` questions of the category, sampled uniformly at random.
    async fn sample_by_category(&self, category_id: &str, count: i64) -> AppResult<Vec<Question>>;
    async fn count_by_category(&self, category_id: &str) -> AppResult<u64>;
    async fn update(&self, id: &str, question: Question) -> AppResult<Question>;
    /// Removes the question document, and with it the embedded answers.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self { collection }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn find_by_answer_id(&self, answer_id: &str) -> AppResult<Option<Question>> {
        let question = self
            .collection
            .find_one(doc! { "answers.id": answer_id })
            .await?;
        Ok(question)
    }

    async fn find_all(
        &self,
        category_id: Option<String>,
        skip: u64,
        limit: i64,
    ) -> AppResult<Vec<Question>> {
        let filter = match category_id {
            Some(cid) => doc! { "category_id": cid },
            None => doc! {},
        };

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit)
            .await?;

        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn sample_by_category(&self, category_id: &str, count: i64) -> AppResult<Vec<Question>> {
        let pipeline = vec![
            doc! { "$match": { "category_id": category_id } },
            doc! { "$sample": { "size": count } },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let mut questions = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            questions.push(from_document::<Question>(document)?);
        }

        Ok(questions)
    }

    async fn count_by_category(&self, category_id: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "category_id": category_id })
            .await?;
        Ok(count)
    }

    async fn update(&self, id: &str, mut question: Question) -> AppResult<Question> {
        question.updated_at = Some(Utc::now());

        let options = ReplaceOptions::builder().upsert(false).build();
        let result = self
            .collection
            .replace_one(doc! { "id": id }, &question)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
