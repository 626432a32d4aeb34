use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::user::{User, UserRole},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_all(&self, role: Option<UserRole>) -> AppResult<Vec<User>>;
    async fn update(&self, id: &str, user: User) -> AppResult<User>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) => {
                // The unique email index is the race-safe backstop behind the
                // service-level duplicate check.
                if let ErrorKind::Write(WriteFailure::WriteError(we)) = e.kind.as_ref() {
                    if we.code == 11000 {
                        return Err(AppError::Validation(format!(
                            "Email '{}' is already in use",
                            user.email
                        )));
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_all(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        let filter = match role {
            Some(role) => doc! { "role": role.as_str() },
            None => doc! {},
        };

        let cursor = self.collection.find(filter).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn update(&self, id: &str, mut user: User) -> AppResult<User> {
        user.updated_at = Some(Utc::now());

        let filter = doc! { "id": id };
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(filter, &user)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                id
            )));
        }

        Ok(user)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on users.email");

        Ok(())
    }
}
