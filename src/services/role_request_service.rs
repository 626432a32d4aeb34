use std::sync::Arc;

use crate::{
    auth::{AuthGate, Claims},
    errors::{AppError, AppResult},
    models::domain::{RoleRequest, RoleRequestStatus, UserRole},
    models::dto::request::CreateRoleRequestBody,
    models::dto::response::{PendingRoleRequestView, RoleApprovalResponse, UserResponse},
    repositories::{RoleRequestRepository, UserRepository},
};
use validator::Validate;

pub struct RoleRequestService {
    requests: Arc<dyn RoleRequestRepository>,
    users: Arc<dyn UserRepository>,
    gate: Arc<AuthGate>,
}

impl RoleRequestService {
    pub fn new(
        requests: Arc<dyn RoleRequestRepository>,
        users: Arc<dyn UserRepository>,
        gate: Arc<AuthGate>,
    ) -> Self {
        Self {
            requests,
            users,
            gate,
        }
    }

    pub async fn create(
        &self,
        claims: &Claims,
        body: CreateRoleRequestBody,
    ) -> AppResult<RoleRequest> {
        body.validate()?;

        if claims.role == body.requested_role {
            return Err(AppError::Validation(format!(
                "You already have the '{}' role",
                body.requested_role
            )));
        }
        if body.requested_role == UserRole::Solver {
            return Err(AppError::Validation(
                "Only the creator and admin roles can be requested".to_string(),
            ));
        }
        if self.requests.has_pending_for_user(&claims.user_id).await? {
            return Err(AppError::Validation(
                "You already have a pending role request".to_string(),
            ));
        }

        let request = RoleRequest::new(&claims.user_id, body.requested_role, &body.reason);
        let request = self.requests.create(request).await?;
        log::info!(
            "User {} requested role '{}' (request {})",
            claims.user_id,
            request.requested_role,
            request.id
        );

        Ok(request)
    }

    pub async fn my_requests(&self, claims: &Claims) -> AppResult<Vec<RoleRequest>> {
        self.requests.find_by_user(&claims.user_id).await
    }

    /// Pending requests joined with the requesting user's current details.
    /// A request whose user has since been deleted is dropped from the list.
    pub async fn pending(&self) -> AppResult<Vec<PendingRoleRequestView>> {
        let requests = self.requests.find_pending().await?;

        let mut views = Vec::with_capacity(requests.len());
        for request in requests {
            match self.users.find_by_id(&request.user_id).await? {
                Some(user) => views.push(PendingRoleRequestView {
                    request_id: request.id,
                    user_id: user.id.clone(),
                    username: user.username.clone(),
                    email: user.email.clone(),
                    current_role: user.role,
                    requested_role: request.requested_role,
                    reason: request.reason,
                    created_at: request.created_at,
                }),
                None => log::warn!(
                    "Role request {} references missing user {}",
                    request.id,
                    request.user_id
                ),
            }
        }

        Ok(views)
    }

    /// Approves a pending request: grants the role, revokes every token the
    /// user holds, and hands back a fresh token carrying the new role.
    pub async fn approve(
        &self,
        admin: &Claims,
        request_id: &str,
        comment: Option<String>,
    ) -> AppResult<RoleApprovalResponse> {
        let request = self.require_request(request_id).await?;
        if request.status != RoleRequestStatus::Pending {
            return Err(AppError::Validation(
                "Role request has already been processed".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_id(&request.user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with id '{}' not found", request.user_id))
            })?;

        let reason = format!(
            "role changed from {} to {}",
            user.role, request.requested_role
        );
        let marker = self.gate.all_tokens_marker(&user.id, &reason);
        let cutoff = marker.cutoff_iat;

        self.requests
            .approve(&request, &admin.user_id, comment, marker)
            .await?;

        // Re-read so the issued token reflects the committed role.
        let user = self
            .users
            .find_by_id(&request.user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with id '{}' not found", request.user_id))
            })?;
        let new_token = self.gate.issue_after(&user, cutoff)?;

        log::info!(
            "Admin {} approved role request {}: user {} is now '{}'",
            admin.user_id,
            request.id,
            user.id,
            user.role
        );

        Ok(RoleApprovalResponse {
            message: format!("Role request approved, user promoted to '{}'", user.role),
            new_token,
            user: UserResponse::from(&user),
        })
    }

    pub async fn reject(
        &self,
        admin: &Claims,
        request_id: &str,
        comment: Option<String>,
    ) -> AppResult<()> {
        let request = self.require_request(request_id).await?;
        if request.status != RoleRequestStatus::Pending {
            return Err(AppError::Validation(
                "Role request has already been processed".to_string(),
            ));
        }

        self.requests
            .reject(&request.id, &admin.user_id, comment)
            .await?;
        log::info!("Admin {} rejected role request {}", admin.user_id, request.id);
        Ok(())
    }

    async fn require_request(&self, id: &str) -> AppResult<RoleRequest> {
        self.requests.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Role request with id '{}' not found", id))
        })
    }
}
