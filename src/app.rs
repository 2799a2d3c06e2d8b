use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route("/api/entries/:id", delete(handlers::delete_entry))
        .route("/api/month/:month", get(handlers::get_month))
        .route("/api/export", get(handlers::export))
        .route("/api/import", post(handlers::import))
        .route("/api/save", post(handlers::save))
        .route("/api/clear", post(handlers::clear))
        .with_state(state)
}
