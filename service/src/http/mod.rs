//! HTTP router and middleware.
//!
//! The binary and the integration tests build the app through
//! [`build_router`], so both exercise the same stack.

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::rest::{get_votelog, get_votelog_summary, list_votelogs, ApiDoc, AppState};

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Routes served under `/api/v1`.
fn api_routes() -> Router {
    Router::new()
        .route("/votelogs", get(list_votelogs))
        .route("/votelogs/{id}", get(get_votelog))
        .route("/votelogs/{id}/summary", get(get_votelog_summary))
}

/// Build the CORS layer from configuration.
///
/// `"*"` allows any origin; an empty list blocks cross-origin requests.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors_origins = &config.allowed_origins;
    let allow_origin: AllowOrigin = if cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow any origin - not recommended for production");
        AllowOrigin::any()
    } else if cors_origins.is_empty() {
        tracing::info!(
            "CORS allowed origins not configured - cross-origin requests will be blocked"
        );
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(origins = ?cors_origins, "CORS allowed origins configured");
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allow_origin)
}

/// Assemble the full application router.
pub fn build_router(state: AppState, cors: &CorsConfig, swagger_enabled: bool) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes());

    if swagger_enabled {
        tracing::info!("Swagger UI enabled at /swagger-ui");
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app.layer(Extension(state))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}
