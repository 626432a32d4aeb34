use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::user::{User, UserRole};

/// JWT claim set. Role and admin flag are baked in at issuance so authorized
/// requests skip a user lookup; a role change must revoke outstanding tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    pub user_id: String,
    /// Unique token id, the revocation key.
    pub jti: String,
    pub role: UserRole,
    pub is_admin: bool,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn new(user: &User, expiration_minutes: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(expiration_minutes);

        Self {
            sub: user.email.clone(),
            user_id: user.id.clone(),
            jti: Uuid::new_v4().to_string(),
            role: user.role,
            is_admin: user.is_admin(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user = User::test_user("johndoe", UserRole::Solver);
        let claims = Claims::new(&user, 30);

        assert_eq!(claims.sub, "johndoe@example.com");
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.role, UserRole::Solver);
        assert!(!claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_fresh_jti_per_token() {
        let user = User::test_user("johndoe", UserRole::Solver);
        let first = Claims::new(&user, 30);
        let second = Claims::new(&user, 30);

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_admin_flag_tracks_role() {
        let admin = User::test_user("root", UserRole::Admin);
        let claims = Claims::new(&admin, 30);
        assert!(claims.is_admin);
    }
}
