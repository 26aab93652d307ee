//! Route configuration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health_routes, student_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Base path of the student API.
pub const STUDENT_API_PATH: &str = "/api/v1/student";

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(STUDENT_API_PATH, student_routes())
        .with_state(state)
}
