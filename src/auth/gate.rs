use std::sync::Arc;

use chrono::Utc;

use crate::{
    auth::{claims::Claims, jwt::JwtService},
    errors::{AppError, AppResult},
    models::domain::revocation::{user_marker, RevocationEntry},
    models::domain::user::User,
    repositories::RevocationRepository,
};

/// Validates bearer tokens against signature, expiry, and the revocation
/// registry, and owns the revocation side of the token lifecycle.
#[derive(Clone)]
pub struct AuthGate {
    jwt: JwtService,
    revocations: Arc<dyn RevocationRepository>,
    revocation_ttl_days: i64,
}

impl AuthGate {
    pub fn new(
        jwt: JwtService,
        revocations: Arc<dyn RevocationRepository>,
        revocation_ttl_days: i64,
    ) -> Self {
        Self {
            jwt,
            revocations,
            revocation_ttl_days,
        }
    }

    pub fn issue(&self, user: &User) -> AppResult<String> {
        self.jwt.issue(user)
    }

    /// Full verification: decode, then check the token's own jti and the
    /// user-wide marker against the registry.
    pub async fn verify(&self, token: &str) -> AppResult<Claims> {
        let claims = self.jwt.decode(token)?;
        let now = Utc::now().timestamp();

        if self.revocations.is_revoked(&claims.jti, now).await? {
            return Err(AppError::Unauthorized(
                "Token has been revoked, please log in again".to_string(),
            ));
        }

        if let Some(marker) = self
            .revocations
            .find_active(&user_marker(&claims.user_id), now)
            .await?
        {
            // The marker only covers tokens issued at or before its cutoff.
            let covered = match marker.cutoff_iat {
                Some(cutoff) => claims.iat as i64 <= cutoff,
                None => true,
            };
            if covered {
                return Err(AppError::Unauthorized(
                    "All tokens for this account have been revoked, please log in again"
                        .to_string(),
                ));
            }
        }

        Ok(claims)
    }

    /// Revokes the single token the claims came from (logout).
    pub async fn revoke_token(&self, claims: &Claims, reason: &str) -> AppResult<()> {
        self.revocations
            .insert(RevocationEntry::for_token(claims, reason))
            .await
    }

    /// Invalidates every token issued to the user before this call. Used on
    /// privilege changes, since role claims cannot be amended in place.
    pub async fn revoke_all_for_user(&self, user_id: &str, reason: &str) -> AppResult<()> {
        let entry = RevocationEntry::all_tokens(user_id, reason, self.revocation_ttl_days);
        self.revocations.replace_user_marker(entry).await
    }

    /// The marker entry used by transactional flows that revoke as part of
    /// a larger multi-document write.
    pub fn all_tokens_marker(&self, user_id: &str, reason: &str) -> RevocationEntry {
        RevocationEntry::all_tokens(user_id, reason, self.revocation_ttl_days)
    }

    /// Issues a token that survives the given marker's cutoff.
    pub fn issue_after(&self, user: &User, marker_cutoff: Option<i64>) -> AppResult<String> {
        self.jwt.issue_after(user, marker_cutoff.unwrap_or(0))
    }
}
