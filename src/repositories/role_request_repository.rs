use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, ClientSession, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{RevocationEntry, RoleRequest, RoleRequestStatus, User},
};

#[async_trait]
pub trait RoleRequestRepository: Send + Sync {
    async fn create(&self, request: RoleRequest) -> AppResult<RoleRequest>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<RoleRequest>>;
    async fn find_pending(&self) -> AppResult<Vec<RoleRequest>>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<RoleRequest>>;
    async fn has_pending_for_user(&self, user_id: &str) -> AppResult<bool>;
    /// Marks the request approved, updates the user's role, and replaces the
    /// user's all-tokens revocation marker — one atomic transaction, so a
    /// partial failure leaves no half-promoted user.
    async fn approve(
        &self,
        request: &RoleRequest,
        admin_id: &str,
        comment: Option<String>,
        marker: RevocationEntry,
    ) -> AppResult<()>;
    async fn reject(&self, id: &str, admin_id: &str, comment: Option<String>) -> AppResult<()>;
}

pub struct MongoRoleRequestRepository {
    client: Client,
    collection: Collection<RoleRequest>,
    users: Collection<User>,
    revocations: Collection<RevocationEntry>,
}

impl MongoRoleRequestRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            client: db.client().clone(),
            collection: db.get_collection("role_requests"),
            users: db.get_collection("users"),
            revocations: db.get_collection("token_revocations"),
        }
    }

    async fn apply_approval(
        &self,
        session: &mut ClientSession,
        request: &RoleRequest,
        admin_id: &str,
        comment: Option<String>,
        marker: RevocationEntry,
    ) -> AppResult<()> {
        let now = Utc::now().to_rfc3339();

        let result = self
            .collection
            .update_one(
                doc! { "id": &request.id, "status": RoleRequestStatus::Pending.as_str() },
                doc! { "$set": {
                    "status": RoleRequestStatus::Approved.as_str(),
                    "processed_by": admin_id,
                    "processed_at": &now,
                    "admin_comment": comment,
                }},
            )
            .session(&mut *session)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::Validation(
                "Role request has already been processed".to_string(),
            ));
        }

        self.users
            .update_one(
                doc! { "id": &request.user_id },
                doc! { "$set": {
                    "role": request.requested_role.as_str(),
                    "updated_at": &now,
                }},
            )
            .session(&mut *session)
            .await?;

        self.revocations
            .delete_many(doc! { "jti": &marker.jti })
            .session(&mut *session)
            .await?;
        self.revocations
            .insert_one(&marker)
            .session(&mut *session)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl RoleRequestRepository for MongoRoleRequestRepository {
    async fn create(&self, request: RoleRequest) -> AppResult<RoleRequest> {
        self.collection.insert_one(&request).await?;
        Ok(request)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<RoleRequest>> {
        let request = self.collection.find_one(doc! { "id": id }).await?;
        Ok(request)
    }

    async fn find_pending(&self) -> AppResult<Vec<RoleRequest>> {
        let cursor = self
            .collection
            .find(doc! { "status": RoleRequestStatus::Pending.as_str() })
            .sort(doc! { "created_at": 1 })
            .await?;
        let requests: Vec<RoleRequest> = cursor.try_collect().await?;
        Ok(requests)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<RoleRequest>> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        let requests: Vec<RoleRequest> = cursor.try_collect().await?;
        Ok(requests)
    }

    async fn has_pending_for_user(&self, user_id: &str) -> AppResult<bool> {
        let request = self
            .collection
            .find_one(doc! {
                "user_id": user_id,
                "status": RoleRequestStatus::Pending.as_str(),
            })
            .await?;
        Ok(request.is_some())
    }

    async fn approve(
        &self,
        request: &RoleRequest,
        admin_id: &str,
        comment: Option<String>,
        marker: RevocationEntry,
    ) -> AppResult<()> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        match self
            .apply_approval(&mut session, request, admin_id, comment, marker)
            .await
        {
            Ok(()) => {
                session.commit_transaction().await?;
                Ok(())
            }
            Err(e) => {
                let _ = session.abort_transaction().await;
                Err(e)
            }
        }
    }

    async fn reject(&self, id: &str, admin_id: &str, comment: Option<String>) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id, "status": RoleRequestStatus::Pending.as_str() },
                doc! { "$set": {
                    "status": RoleRequestStatus::Rejected.as_str(),
                    "processed_by": admin_id,
                    "processed_at": Utc::now().to_rfc3339(),
                    "admin_comment": comment,
                }},
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::Validation(
                "Role request has already been processed".to_string(),
            ));
        }

        Ok(())
    }
}
