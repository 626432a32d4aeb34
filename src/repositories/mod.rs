pub mod category_repository;
pub mod question_repository;
pub mod quiz_session_repository;
pub mod revocation_repository;
pub mod role_request_repository;
pub mod score_repository;
pub mod user_repository;

pub use category_repository::{CategoryRepository, MongoCategoryRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_session_repository::{MongoQuizSessionRepository, QuizSessionRepository};
pub use revocation_repository::{MongoRevocationRepository, RevocationRepository};
pub use role_request_repository::{MongoRoleRequestRepository, RoleRequestRepository};
pub use score_repository::{MongoScoreRepository, ScoreRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
