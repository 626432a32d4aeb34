use std::sync::Arc;

use crate::{
    auth::password::{hash_password, verify_password},
    errors::{AppError, AppResult},
    models::domain::user::{User, UserRole},
    models::dto::request::{RegisterRequest, UpdateProfileRequest},
    repositories::UserRepository,
};
use validator::Validate;

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Validation(format!(
                "Email '{}' is already in use",
                request.email
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            &request.email,
            &request.username,
            &password_hash,
            UserRole::Solver,
        );

        let user = self.users.create(user).await?;
        log::info!("Registered new user {} ({})", user.email, user.id);

        Ok(user)
    }

    /// Bad email and bad password fail identically, so the endpoint does
    /// not leak which accounts exist.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::Unauthorized(
                "This account has been deactivated".to_string(),
            ));
        }

        log::info!("Login for user {} ({})", user.email, user.id);
        Ok(user)
    }

    pub async fn get_by_id(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }

    pub async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        self.users.find_all(role).await
    }

    /// Patch update: absent fields are left unchanged.
    pub async fn update_profile(
        &self,
        user_id: &str,
        patch: UpdateProfileRequest,
    ) -> AppResult<User> {
        patch.validate()?;

        let mut user = self.get_by_id(user_id).await?;

        if let Some(email) = patch.email {
            if email != user.email && self.users.find_by_email(&email).await?.is_some() {
                return Err(AppError::Validation(format!(
                    "Email '{}' is already in use",
                    email
                )));
            }
            user.email = email;
        }

        if let Some(username) = patch.username {
            user.username = username;
        }

        if let Some(password) = patch.password {
            user.password_hash = hash_password(&password)?;
        }

        let user = self.users.update(user_id, user).await?;
        log::info!("Updated profile for user {}", user_id);

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            username: "johndoe".to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_solver() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(users));
        let user = service
            .register(register_request("john@example.com"))
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Solver);
        assert_eq!(user.email, "john@example.com");
        // Never the plaintext.
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_validation_error() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|email| {
            Ok(Some(User::test_user_with_email(email)))
        });

        let service = UserService::new(Arc::new(users));
        let result = service.register(register_request("taken@example.com")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(users));
        let result = service.authenticate("ghost@example.com", "whatever").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hash = hash_password("right password").unwrap();
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(move |email| {
            let mut user = User::test_user_with_email(email);
            user.password_hash = hash.clone();
            Ok(Some(user))
        });

        let service = UserService::new(Arc::new(users));
        let result = service.authenticate("john@example.com", "wrong password").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_authenticate_inactive_account() {
        let hash = hash_password("password123").unwrap();
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(move |email| {
            let mut user = User::test_user_with_email(email);
            user.password_hash = hash.clone();
            user.is_active = false;
            Ok(Some(user))
        });

        let service = UserService::new(Arc::new(users));
        let result = service.authenticate("john@example.com", "password123").await;

        match result {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("deactivated")),
            other => panic!("expected Unauthorized, got {:?}", other.is_ok()),
        }
    }
}
