use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use qna_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    handlers::{
        auth_handler, category_handler, health_check, health_check_ready, qna_handler,
        quiz_handler, role_request_handler, score_handler,
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    config.validate_for_production();

    let state = Arc::new(AppState::new(config.clone()).await.map_err(|e| {
        log::error!("Failed to initialize application state: {}", e);
        std::io::Error::other(e.to_string())
    })?);

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    log::info!("Starting server on {}:{}", bind_addr.0, bind_addr.1);

    let auth_gate = web::Data::from(state.auth_gate.clone());

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&state.config.allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(auth_gate.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(health_check)
            .service(health_check_ready)
            .service(auth_handler::register)
            .service(auth_handler::login)
            .service(auth_handler::admin_login)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(auth_handler::logout)
                    .service(auth_handler::me)
                    .service(auth_handler::update_me)
                    .service(auth_handler::list_users)
                    .service(auth_handler::get_user)
                    .service(category_handler::create_category)
                    .service(category_handler::list_categories)
                    .service(category_handler::get_category)
                    .service(category_handler::update_category)
                    .service(category_handler::delete_category)
                    .service(qna_handler::create_question)
                    .service(qna_handler::list_questions)
                    .service(qna_handler::get_question)
                    .service(qna_handler::update_question)
                    .service(qna_handler::update_answer)
                    .service(qna_handler::delete_question)
                    .service(qna_handler::submit_answers)
                    .service(quiz_handler::create_session)
                    .service(quiz_handler::my_sessions)
                    .service(quiz_handler::get_session)
                    .service(quiz_handler::submit_session_answer)
                    .service(quiz_handler::session_questions)
                    .service(score_handler::submit_score)
                    .service(score_handler::score_history)
                    .service(score_handler::score_summary)
                    .service(role_request_handler::create_role_request)
                    .service(role_request_handler::my_role_requests)
                    .service(role_request_handler::pending_role_requests)
                    .service(role_request_handler::approve_role_request)
                    .service(role_request_handler::reject_role_request),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
