use std::sync::Arc;

use chrono::Utc;

use crate::{
    auth::{AuthGate, JwtService},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoCategoryRepository, MongoQuestionRepository, MongoQuizSessionRepository,
        MongoRevocationRepository, MongoRoleRequestRepository, MongoScoreRepository,
        MongoUserRepository, RevocationRepository, UserRepository,
    },
    services::{
        CategoryService, QnaService, QuizService, RoleRequestService, ScoreService, UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub qna_service: Arc<QnaService>,
    pub quiz_service: Arc<QuizService>,
    pub score_service: Arc<ScoreService>,
    pub role_request_service: Arc<RoleRequestService>,
    pub auth_gate: Arc<AuthGate>,
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let revocation_repository = Arc::new(MongoRevocationRepository::new(&db));
        revocation_repository.ensure_indexes().await?;
        let purged = revocation_repository
            .purge_expired(Utc::now().timestamp())
            .await?;
        if purged > 0 {
            log::info!("Purged {} expired revocation entries", purged);
        }

        let category_repository = Arc::new(MongoCategoryRepository::new(&db));
        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        let session_repository = Arc::new(MongoQuizSessionRepository::new(&db));
        let score_repository = Arc::new(MongoScoreRepository::new(&db));
        let role_request_repository = Arc::new(MongoRoleRequestRepository::new(&db));

        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_minutes);
        let auth_gate = Arc::new(AuthGate::new(
            jwt,
            revocation_repository,
            config.revocation_ttl_days,
        ));

        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let category_service = Arc::new(CategoryService::new(
            category_repository.clone(),
            question_repository.clone(),
        ));
        let qna_service = Arc::new(QnaService::new(
            question_repository.clone(),
            category_repository.clone(),
        ));
        let score_service = Arc::new(ScoreService::new(
            question_repository.clone(),
            score_repository,
        ));
        let quiz_service = Arc::new(QuizService::new(
            session_repository,
            question_repository,
            category_repository,
            score_service.clone(),
            config.default_session_question_count,
        ));
        let role_request_service = Arc::new(RoleRequestService::new(
            role_request_repository,
            user_repository,
            auth_gate.clone(),
        ));

        Ok(Self {
            user_service,
            category_service,
            qna_service,
            quiz_service,
            score_service,
            role_request_service,
            auth_gate,
            db: Arc::new(db),
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
