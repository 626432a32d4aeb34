use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    models::domain::user::UserRole,
};

/// Authorization predicates applied per operation. Valid credential but
/// insufficient role maps to `Forbidden` (403), never `Unauthorized`.
pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

pub fn require_roles(claims: &Claims, allowed: &[UserRole]) -> AppResult<()> {
    if !allowed.contains(&claims.role) {
        return Err(AppError::Forbidden(format!(
            "This action requires one of the following roles: {}",
            allowed
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(())
}

pub fn require_owner_or_admin(claims: &Claims, resource_owner: &str) -> AppResult<()> {
    if claims.role != UserRole::Admin && claims.user_id != resource_owner {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::user::User;

    fn create_test_claims(username: &str, role: UserRole) -> Claims {
        Claims::new(&User::test_user(username, role), 30)
    }

    #[test]
    fn test_require_admin_success() {
        let claims = create_test_claims("root", UserRole::Admin);
        assert!(require_admin(&claims).is_ok());
    }

    #[test]
    fn test_require_admin_failure_is_forbidden() {
        let claims = create_test_claims("john", UserRole::Solver);
        assert!(matches!(
            require_admin(&claims),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_require_roles() {
        let creator = create_test_claims("maker", UserRole::Creator);
        assert!(require_roles(&creator, &[UserRole::Creator, UserRole::Admin]).is_ok());

        let solver = create_test_claims("john", UserRole::Solver);
        assert!(require_roles(&solver, &[UserRole::Creator, UserRole::Admin]).is_err());
    }

    #[test]
    fn test_require_owner_or_admin() {
        let owner = create_test_claims("john", UserRole::Solver);
        assert!(require_owner_or_admin(&owner, &owner.user_id).is_ok());
        assert!(require_owner_or_admin(&owner, "someone-else").is_err());

        let admin = create_test_claims("root", UserRole::Admin);
        assert!(require_owner_or_admin(&admin, "someone-else").is_ok());
    }
}
