use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::claims::Claims;

/// Negative credential state: a revoked jti, or the synthetic per-user
/// marker that invalidates every token issued to a user. The token itself
/// is never stored server-side.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RevocationEntry {
    pub user_id: String,
    pub jti: String,
    pub reason: String,
    /// Unix seconds; entries past this instant are ignored and may be purged.
    pub expires_at: i64,
    /// For all-tokens markers: tokens with `iat <= cutoff_iat` are covered.
    /// Tokens minted after the marker (a fresh login, the token returned on
    /// role approval) stay valid. `None` on single-token entries, where the
    /// jti match alone decides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_iat: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RevocationEntry {
    /// Revokes the single token the claims were decoded from. The entry only
    /// needs to outlive the token, so it expires when the token does.
    pub fn for_token(claims: &Claims, reason: &str) -> Self {
        RevocationEntry {
            user_id: claims.user_id.clone(),
            jti: claims.jti.clone(),
            reason: reason.to_string(),
            expires_at: claims.exp as i64,
            cutoff_iat: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Marker covering every outstanding token for a user.
    pub fn all_tokens(user_id: &str, reason: &str, ttl_days: i64) -> Self {
        let now = Utc::now();
        RevocationEntry {
            user_id: user_id.to_string(),
            jti: user_marker(user_id),
            reason: reason.to_string(),
            expires_at: (now + Duration::days(ttl_days)).timestamp(),
            cutoff_iat: Some(now.timestamp()),
            created_at: Some(now),
        }
    }
}

/// The registry key under which a user's all-tokens marker is stored.
pub fn user_marker(user_id: &str) -> String {
    format!("user_{}_all", user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_marker_format() {
        assert_eq!(user_marker("abc-123"), "user_abc-123_all");
    }

    #[test]
    fn test_all_tokens_marker_expires_in_the_future() {
        let entry = RevocationEntry::all_tokens("u-1", "role change", 30);
        assert_eq!(entry.jti, "user_u-1_all");
        assert!(entry.expires_at > Utc::now().timestamp());
        assert!(entry.cutoff_iat.is_some());
    }

    #[test]
    fn test_single_token_entry_has_no_cutoff() {
        let claims = crate::auth::claims::Claims {
            sub: "john@example.com".to_string(),
            user_id: "u-1".to_string(),
            jti: "jti-1".to_string(),
            role: crate::models::domain::user::UserRole::Solver,
            is_admin: false,
            iat: 0,
            exp: 100,
        };
        let entry = RevocationEntry::for_token(&claims, "logout");
        assert_eq!(entry.jti, "jti-1");
        assert_eq!(entry.expires_at, 100);
        assert!(entry.cutoff_iat.is_none());
    }
}
