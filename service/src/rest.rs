//! REST API handlers and `OpenAPI` documentation.
//!
//! Every endpoint is read-only and serves the same page models that the
//! export tool writes to disk.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Serialize, Serializer};
use utoipa::{OpenApi, ToSchema};
use vl_core::{summarize, VoteSummary};

use crate::votelog::{
    build_index, build_page, PageSettings, RepoError, VoteLogPage, VoteLogRepository,
    VoteLogSummaryItem,
};

/// Shared state for the REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn VoteLogRepository>,
    pub settings: Arc<PageSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(repo: Arc<dyn VoteLogRepository>, settings: PageSettings) -> Self {
        Self {
            repo,
            settings: Arc::new(settings),
        }
    }
}

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// URI reference identifying the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ProblemExtensions>,
}

/// Extended error information.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemExtensions {
    pub code: String,
}

impl ProblemDetails {
    /// Create a not-found response for a vote log id.
    #[must_use]
    pub fn not_found(id: &str) -> Self {
        Self {
            problem_type: "https://votelog.example.org/errors/not-found".to_string(),
            title: "Not Found".to_string(),
            status: StatusCode::NOT_FOUND,
            detail: format!("No vote log with id '{id}'"),
            instance: Some(format!("/votelogs/{id}")),
            extensions: Some(ProblemExtensions {
                code: "NOT_FOUND".to_string(),
            }),
        }
    }

    /// Create an internal server error response.
    #[must_use]
    pub fn internal_error(detail: &str) -> Self {
        Self {
            problem_type: "https://votelog.example.org/errors/internal".to_string(),
            title: "Internal Server Error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.to_string(),
            instance: None,
            extensions: Some(ProblemExtensions {
                code: "INTERNAL_ERROR".to_string(),
            }),
        }
    }
}

impl From<RepoError> for ProblemDetails {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::not_found(&id),
            other => {
                tracing::error!(error = %other, "vote-log repository failure");
                Self::internal_error("Vote-log data is unavailable")
            }
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Votelog API",
        version = "1.0.0",
        description = "Read-only access to legislative vote logs",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "REST API v1")
    ),
    paths(list_votelogs, get_votelog, get_votelog_summary),
    components(schemas(
        VoteLogPage,
        VoteLogSummaryItem,
        VoteSummary,
        ProblemDetails,
        ProblemExtensions
    ))
)]
pub struct ApiDoc;

/// List vote logs
///
/// Returns every vote event with its outcome, in source order.
///
/// # Errors
///
/// Returns `ProblemDetails` if the data cannot be read.
#[utoipa::path(
    get,
    path = "/votelogs",
    tag = "Votelog",
    responses(
        (status = 200, description = "Vote log index", body = [VoteLogSummaryItem]),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn list_votelogs(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<VoteLogSummaryItem>>, ProblemDetails> {
    Ok(Json(build_index(state.repo.as_ref())?))
}

/// Get a vote log page
///
/// Returns the full page model: metadata, voter groups and waffle grid.
///
/// # Errors
///
/// Returns `ProblemDetails` with 404 for an unknown id.
#[utoipa::path(
    get,
    path = "/votelogs/{id}",
    tag = "Votelog",
    params(("id" = String, Path, description = "Vote event id")),
    responses(
        (status = 200, description = "Vote log page", body = VoteLogPage),
        (status = 404, description = "Unknown vote event", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)]
pub async fn get_votelog(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VoteLogPage>, ProblemDetails> {
    Ok(Json(build_page(
        state.repo.as_ref(),
        &id,
        state.settings.as_ref(),
    )?))
}

/// Get a vote log outcome
///
/// Returns pass/fail and the number of eligible voters.
///
/// # Errors
///
/// Returns `ProblemDetails` with 404 for an unknown id.
#[utoipa::path(
    get,
    path = "/votelogs/{id}/summary",
    tag = "Votelog",
    params(("id" = String, Path, description = "Vote event id")),
    responses(
        (status = 200, description = "Vote outcome", body = VoteSummary),
        (status = 404, description = "Unknown vote event", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)]
pub async fn get_votelog_summary(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VoteSummary>, ProblemDetails> {
    let event = state.repo.vote_event(&id)?;
    Ok(Json(summarize(&event)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_details_serializes_correctly() {
        let problem = ProblemDetails::internal_error("Something went wrong");
        let json = serde_json::to_string(&problem).expect("serialize");
        assert!(json.contains("\"type\":"));
        assert!(json.contains("INTERNAL_ERROR"));
        assert!(json.contains("\"status\":500"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let problem = ProblemDetails::from(RepoError::NotFound("v9".into()));
        assert_eq!(problem.status, StatusCode::NOT_FOUND);
        assert_eq!(problem.instance.as_deref(), Some("/votelogs/v9"));
    }

    #[test]
    fn other_repo_errors_map_to_500_without_leaking_detail() {
        let problem = ProblemDetails::from(RepoError::Invalid("secret path".into()));
        assert_eq!(problem.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!problem.detail.contains("secret"));
    }
}
