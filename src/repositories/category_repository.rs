use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::ReplaceOptions, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Category,
};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> AppResult<Category>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Category>>;
    async fn find_all(&self) -> AppResult<Vec<Category>>;
    async fn update(&self, id: &str, category: Category) -> AppResult<Category>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("categories");
        Self { collection }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn create(&self, category: Category) -> AppResult<Category> {
        self.collection.insert_one(&category).await?;
        Ok(category)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Category>> {
        let category = self.collection.find_one(doc! { "id": id }).await?;
        Ok(category)
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "name": 1 }).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;
        Ok(categories)
    }

    async fn update(&self, id: &str, mut category: Category) -> AppResult<Category> {
        category.updated_at = Some(Utc::now());

        let options = ReplaceOptions::builder().upsert(false).build();
        let result = self
            .collection
            .replace_one(doc! { "id": id }, &category)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                id
            )));
        }

        Ok(category)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
