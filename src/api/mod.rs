mod handlers;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session::Session;

pub fn create_router(session: Session) -> Router {
    let api = Router::new()
        // Session snapshot
        .route("/session", get(handlers::get_session))
        // Tasks
        .route("/tasks", get(handlers::list_tasks))
        .route("/tasks", post(handlers::create_task))
        .route("/tasks/{id}/toggle", post(handlers::toggle_task))
        .route("/tasks/{id}", delete(handlers::delete_task))
        // Analysis
        .route("/analysis", get(handlers::get_session))
        .route("/analysis/refresh", post(handlers::refresh_analysis))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(session)
}
