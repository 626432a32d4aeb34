use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::user::UserRole;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RoleRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleRequestStatus::Pending => "pending",
            RoleRequestStatus::Approved => "approved",
            RoleRequestStatus::Rejected => "rejected",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoleRequest {
    pub id: String,
    pub user_id: String,
    pub requested_role: UserRole,
    pub reason: String,
    pub status: RoleRequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RoleRequest {
    pub fn new(user_id: &str, requested_role: UserRole, reason: &str) -> Self {
        RoleRequest {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            requested_role,
            reason: reason.to_string(),
            status: RoleRequestStatus::Pending,
            admin_comment: None,
            processed_by: None,
            processed_at: None,
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = RoleRequest::new("user-1", UserRole::Creator, "I write good questions");
        assert_eq!(request.status, RoleRequestStatus::Pending);
        assert!(request.processed_by.is_none());
        assert!(request.processed_at.is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RoleRequestStatus::Approved).unwrap(),
            "\"approved\""
        );
    }
}
