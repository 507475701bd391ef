pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::wizard::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(handlers::handle_options))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_session))
        .route(
            "/api/v1/sessions/:id/profile",
            post(handlers::handle_submit_profile),
        )
        .route(
            "/api/v1/sessions/:id/post",
            post(handlers::handle_submit_post),
        )
        .route(
            "/api/v1/sessions/:id/round",
            post(handlers::handle_ensure_round),
        )
        .route(
            "/api/v1/sessions/:id/round/draft",
            put(handlers::handle_update_draft),
        )
        .route(
            "/api/v1/sessions/:id/round/examples/:n",
            post(handlers::handle_use_example),
        )
        .route(
            "/api/v1/sessions/:id/responses",
            post(handlers::handle_submit_response),
        )
        .route(
            "/api/v1/sessions/:id/comment",
            post(handlers::handle_compose_comment),
        )
        .route(
            "/api/v1/sessions/:id/start-over",
            post(handlers::handle_start_over),
        )
        .with_state(state)
}
