use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Collection,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::score::{CategoryStat, ScoreRecord},
};

#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn create(&self, record: ScoreRecord) -> AppResult<ScoreRecord>;
    async fn find_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<ScoreRecord>>;
    /// Per-category totals aggregated from the append-only history.
    async fn category_stats(&self, user_id: &str) -> AppResult<Vec<CategoryStat>>;
}

pub struct MongoScoreRepository {
    collection: Collection<ScoreRecord>,
}

impl MongoScoreRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("user_scores");
        Self { collection }
    }
}

fn numeric(document: &Document, key: &str) -> i64 {
    document
        .get_i64(key)
        .or_else(|_| document.get_i32(key).map(i64::from))
        .unwrap_or(0)
}

#[async_trait]
impl ScoreRepository for MongoScoreRepository {
    async fn create(&self, record: ScoreRecord) -> AppResult<ScoreRecord> {
        self.collection.insert_one(&record).await?;
        Ok(record)
    }

    async fn find_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<ScoreRecord>> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "submitted_at": -1 })
            .limit(limit)
            .await?;
        let records: Vec<ScoreRecord> = cursor.try_collect().await?;
        Ok(records)
    }

    async fn category_stats(&self, user_id: &str) -> AppResult<Vec<CategoryStat>> {
        let pipeline = vec![
            doc! { "$match": { "user_id": user_id } },
            doc! { "$group": {
                "_id": "$category_id",
                "total_questions": { "$sum": 1 },
                "correct_answers": { "$sum": { "$cond": [ "$correct", 1, 0 ] } },
            }},
            doc! { "$sort": { "_id": 1 } },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let mut stats = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            stats.push(CategoryStat {
                category_id: document.get_str("_id").unwrap_or_default().to_string(),
                total_questions: numeric(&document, "total_questions"),
                correct_answers: numeric(&document, "correct_answers"),
            });
        }

        Ok(stats)
    }
}
