use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::question::{Answer, AnswerArity, Question};
use crate::models::domain::quiz_session::{QuizSession, SessionQuestion};
use crate::models::domain::user::{User, UserRole};
use crate::services::grading::Grading;

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub is_admin: bool,
    pub is_active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            user_id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            is_admin: user.is_admin(),
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(access_token: String, user: &User) -> Self {
        AuthResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: UserResponse::from(user),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradingResponse {
    pub is_correct: bool,
    pub correct_answer_ids: Vec<String>,
    pub incorrect_selections: Vec<String>,
    pub unselected_correct: Vec<String>,
    pub score_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl GradingResponse {
    pub fn new(grading: Grading, score_id: String) -> Self {
        GradingResponse {
            is_correct: grading.is_correct,
            correct_answer_ids: grading.correct_answer_ids,
            incorrect_selections: grading.incorrect_selections,
            unselected_correct: grading.unselected_correct,
            score_id,
            session_id: None,
        }
    }

    pub fn in_session(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }
}

/// Correctness as exposed to clients. `Unknown` masks the answer key for
/// questions the requester has not answered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Correctness {
    Correct,
    Incorrect,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerView {
    pub id: String,
    pub text: String,
    pub correctness: Correctness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AnswerView {
    fn from_answer(answer: &Answer, reveal: bool) -> Self {
        let correctness = if !reveal {
            Correctness::Unknown
        } else if answer.correct {
            Correctness::Correct
        } else {
            Correctness::Incorrect
        };

        AnswerView {
            id: answer.id.clone(),
            text: answer.text.clone(),
            correctness,
            note: answer.note.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub category_id: String,
    pub arity: AnswerArity,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    pub answers: Vec<AnswerView>,
}

impl QuestionView {
    /// `reveal` controls whether answer correctness is exposed or masked.
    pub fn from_question(question: &Question, reveal: bool) -> Self {
        QuestionView {
            id: question.id.clone(),
            category_id: question.category_id.clone(),
            arity: question.arity,
            prompt: question.prompt.clone(),
            note: question.note.clone(),
            link_url: question.link_url.clone(),
            answers: question
                .answers
                .iter()
                .map(|a| AnswerView::from_answer(a, reveal))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionQuestionView {
    pub question_id: String,
    pub position: i32,
    pub answered: bool,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<DateTime<Utc>>,
    pub detail: QuestionView,
}

impl SessionQuestionView {
    pub fn new(sq: &SessionQuestion, question: &Question) -> Self {
        // The answer key stays hidden until this question has been answered
        // within the session.
        let detail = QuestionView::from_question(question, sq.answered);

        SessionQuestionView {
            question_id: sq.question_id.clone(),
            position: sq.position,
            answered: sq.answered,
            correct: sq.correct,
            answered_at: sq.answered_at,
            detail,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub category_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub question_count: usize,
    pub completed_count: usize,
    pub correct_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&QuizSession> for SessionResponse {
    fn from(session: &QuizSession) -> Self {
        SessionResponse {
            id: session.id.clone(),
            category_id: session.category_id.clone(),
            name: session.name.clone(),
            description: session.description.clone(),
            question_count: session.questions.len(),
            completed_count: session.completed_count(),
            correct_count: session.correct_count(),
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingRoleRequestView {
    pub request_id: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub current_role: UserRole,
    pub requested_role: UserRole,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleApprovalResponse {
    pub message: String,
    /// A fresh token carrying the updated role; the user's previous tokens
    /// are revoked as part of the approval.
    pub new_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
