pub mod category;
pub mod question;
pub mod quiz_session;
pub mod revocation;
pub mod role_request;
pub mod score;
pub mod user;

pub use category::Category;
pub use question::{Answer, AnswerArity, Question};
pub use quiz_session::{QuizSession, SessionQuestion};
pub use revocation::RevocationEntry;
pub use role_request::{RoleRequest, RoleRequestStatus};
pub use score::{CategoryStat, ScoreRecord, ScoreSummary};
pub use user::{User, UserRole};
