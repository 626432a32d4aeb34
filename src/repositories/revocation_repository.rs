use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::RevocationEntry};

/// Registry of revoked token ids and per-user all-tokens markers. Only
/// negative state is stored; tokens themselves never are.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    async fn insert(&self, entry: RevocationEntry) -> AppResult<()>;
    /// True when an unexpired entry exists for this jti (or marker key).
    async fn is_revoked(&self, jti: &str, now: i64) -> AppResult<bool>;
    /// The unexpired entry for this jti, if any. Used for marker lookups
    /// where the caller needs the cutoff.
    async fn find_active(&self, jti: &str, now: i64) -> AppResult<Option<RevocationEntry>>;
    /// Idempotently swaps the user's all-tokens marker for a fresh one.
    async fn replace_user_marker(&self, entry: RevocationEntry) -> AppResult<()>;
    /// Opportunistic cleanup; expired entries are already ignored by
    /// `is_revoked`, this just reclaims space.
    async fn purge_expired(&self, now: i64) -> AppResult<u64>;
}

pub struct MongoRevocationRepository {
    collection: Collection<RevocationEntry>,
}

impl MongoRevocationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("token_revocations");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "jti": 1 })
            .options(IndexOptions::builder().name("jti".to_string()).build())
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created index on token_revocations.jti");

        Ok(())
    }
}

#[async_trait]
impl RevocationRepository for MongoRevocationRepository {
    async fn insert(&self, entry: RevocationEntry) -> AppResult<()> {
        self.collection.insert_one(&entry).await?;
        Ok(())
    }

    async fn is_revoked(&self, jti: &str, now: i64) -> AppResult<bool> {
        let entry = self.find_active(jti, now).await?;
        Ok(entry.is_some())
    }

    async fn find_active(&self, jti: &str, now: i64) -> AppResult<Option<RevocationEntry>> {
        let entry = self
            .collection
            .find_one(doc! { "jti": jti, "expires_at": { "$gt": now } })
            .await?;
        Ok(entry)
    }

    async fn replace_user_marker(&self, entry: RevocationEntry) -> AppResult<()> {
        self.collection
            .delete_many(doc! { "jti": &entry.jti })
            .await?;
        self.collection.insert_one(&entry).await?;
        Ok(())
    }

    async fn purge_expired(&self, now: i64) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "expires_at": { "$lte": now } })
            .await?;
        Ok(result.deleted_count)
    }
}
