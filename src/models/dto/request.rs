use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::question::AnswerArity;
use crate::models::domain::user::UserRole;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 3, max = 20))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Patch semantics: an absent field is left unchanged. None of the
/// user-updatable fields are nullable, so "present-and-null" is not a
/// distinct state here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 20))]
    pub username: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub in_use: Option<bool>,
}

// Serialize is needed so a failing nested validation can carry the
// offending answer in its error params.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AnswerInput {
    #[validate(length(min = 1))]
    pub text: String,

    pub correct: bool,

    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    pub category_id: String,

    pub arity: AnswerArity,

    #[validate(length(min = 1))]
    pub prompt: String,

    pub note: Option<String>,

    #[validate(url)]
    pub link_url: Option<String>,

    pub group_id: Option<String>,

    #[validate(nested, length(min = 1, message = "A question needs at least one answer"))]
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    pub category_id: Option<String>,

    pub arity: Option<AnswerArity>,

    #[validate(length(min = 1))]
    pub prompt: Option<String>,

    pub note: Option<String>,

    #[validate(url)]
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnswerRequest {
    #[validate(length(min = 1))]
    pub text: Option<String>,

    pub correct: Option<bool>,

    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListQuestionsQuery {
    pub category_id: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswersRequest {
    pub question_id: String,
    pub selected_answer_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSessionRequest {
    pub category_id: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,

    /// Falls back to the configured default when absent.
    pub question_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSubmitRequest {
    pub question_id: String,
    pub selected_answer_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoleRequestBody {
    pub requested_role: UserRole,

    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleDecisionRequest {
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_bad_email() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            username: "johndoe".to_string(),
            password: "password123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let request = RegisterRequest {
            email: "john@example.com".to_string(),
            username: "johndoe".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_question_requires_answers() {
        let request = CreateQuestionRequest {
            category_id: "cat-1".to_string(),
            arity: AnswerArity::Single,
            prompt: "What is 2 + 2?".to_string(),
            note: None,
            link_url: None,
            group_id: None,
            answers: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_question_rejects_blank_answer_text() {
        let request = CreateQuestionRequest {
            category_id: "cat-1".to_string(),
            arity: AnswerArity::Single,
            prompt: "What is 2 + 2?".to_string(),
            note: None,
            link_url: None,
            group_id: None,
            answers: vec![AnswerInput {
                text: String::new(),
                correct: true,
                note: None,
            }],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_update_profile_is_valid() {
        assert!(UpdateProfileRequest::default().validate().is_ok());
    }
}
