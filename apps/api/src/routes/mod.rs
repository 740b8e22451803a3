pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::proposal::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless calculators
        .route("/api/v1/pricing/totals", post(handlers::handle_compute_totals))
        .route(
            "/api/v1/schedule/recommend",
            post(handlers::handle_recommend_schedule),
        )
        // Proposal drafts (session-scoped)
        .route("/api/v1/drafts", post(handlers::handle_create_draft))
        .route(
            "/api/v1/drafts/:id",
            get(handlers::handle_get_draft)
                .put(handlers::handle_replace_draft)
                .delete(handlers::handle_delete_draft),
        )
        // RFP/PWS analysis
        .route("/api/v1/drafts/:id/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/drafts/:id/apply-analysis",
            post(handlers::handle_apply_analysis),
        )
        // Export surface
        .route(
            "/api/v1/drafts/:id/export/docx",
            get(handlers::handle_export_docx),
        )
        .route(
            "/api/v1/drafts/:id/export/json",
            get(handlers::handle_export_json),
        )
        .with_state(state)
}
