use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Creator,
    Solver,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Creator => "creator",
            UserRole::Solver => "solver",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "creator" => Ok(UserRole::Creator),
            "solver" => Ok(UserRole::Solver),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(email: &str, username: &str, password_hash: &str, role: UserRole) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
            is_active: true,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str, role: UserRole) -> Self {
        User::new(
            &format!("{}@example.com", username),
            username,
            "not-a-real-hash",
            role,
        )
    }

    pub fn test_user_with_email(email: &str) -> Self {
        User::new(email, "testuser", "not-a-real-hash", UserRole::Solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("john@example.com", "johndoe", "hash", UserRole::Solver);
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.username, "johndoe");
        assert_eq!(user.role, UserRole::Solver);
        assert!(user.is_active);
        assert!(!user.is_admin());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Creator).unwrap();
        assert_eq!(json, "\"creator\"");

        let parsed: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, UserRole::Admin);
    }

    #[test]
    fn test_role_rejects_unknown_variant() {
        assert!(serde_json::from_str::<UserRole>("\"superuser\"").is_err());
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_from_str_round_trip() {
        for role in [UserRole::Admin, UserRole::Creator, UserRole::Solver] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
    }
}
