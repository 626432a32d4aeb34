use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Category,
    models::dto::request::{CreateCategoryRequest, UpdateCategoryRequest},
    repositories::{CategoryRepository, QuestionRepository},
};
use validator::Validate;

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            categories,
            questions,
        }
    }

    pub async fn create(&self, request: CreateCategoryRequest) -> AppResult<Category> {
        request.validate()?;

        let category = self.categories.create(Category::new(&request.name)).await?;
        log::info!("Created category '{}' ({})", category.name, category.id);
        Ok(category)
    }

    pub async fn get(&self, id: &str) -> AppResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id '{}' not found", id)))
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.categories.find_all().await
    }

    pub async fn update(&self, id: &str, patch: UpdateCategoryRequest) -> AppResult<Category> {
        patch.validate()?;

        let mut category = self.get(id).await?;

        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(in_use) = patch.in_use {
            category.in_use = in_use;
        }

        self.categories.update(id, category).await
    }

    /// Refuses to delete a category that still has questions rather than
    /// orphaning them.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.get(id).await?;

        let question_count = self.questions.count_by_category(id).await?;
        if question_count > 0 {
            return Err(AppError::Validation(format!(
                "Category still has {} question(s); delete or move them first",
                question_count
            )));
        }

        self.categories.delete(id).await?;
        log::info!("Deleted category {}", id);
        Ok(())
    }
}
