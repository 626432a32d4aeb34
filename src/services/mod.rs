pub mod category_service;
pub mod grading;
pub mod qna_service;
pub mod quiz_service;
pub mod role_request_service;
pub mod score_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use grading::{grade, Grading};
pub use qna_service::QnaService;
pub use quiz_service::QuizService;
pub use role_request_service::RoleRequestService;
pub use score_service::ScoreService;
pub use user_service::UserService;
