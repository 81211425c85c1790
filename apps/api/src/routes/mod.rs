pub mod health;
pub mod resume;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::admin::handlers as admin;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Résumé API
        .route("/api/v1/resume", get(resume::handle_get_default))
        .route("/api/v1/resume/:id", get(resume::handle_get_resume))
        .route("/api/v1/resume/:id", patch(resume::handle_patch_resume))
        // Admin panel: generic CRUD over the schema
        .route("/api/v1/admin", get(admin::handle_admin_config))
        .route("/api/v1/admin/:entity", get(admin::handle_admin_list))
        .route("/api/v1/admin/:entity", post(admin::handle_admin_create))
        .route("/api/v1/admin/:entity/:id", get(admin::handle_admin_get))
        .route("/api/v1/admin/:entity/:id", put(admin::handle_admin_update))
        .route(
            "/api/v1/admin/:entity/:id",
            delete(admin::handle_admin_delete),
        )
        .with_state(state)
}
