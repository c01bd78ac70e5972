//! Test app builder that goes through the production router.
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_full_app() {
//!     let app = TestAppBuilder::with_mocks()
//!         .with_cors(&["http://localhost:8000"])
//!         .build();
//!
//!     // Use app.oneshot(...) to send requests
//! }
//! ```

use std::sync::Arc;

use axum::Router;
use votelog_api::{
    config::CorsConfig,
    http::build_router,
    rest::AppState,
    votelog::{PageSettings, VoteLogRepository},
};

use super::sample_repo;

/// Builder for test applications.
pub struct TestAppBuilder {
    repo: Arc<dyn VoteLogRepository>,
    settings: PageSettings,
    cors_origins: Vec<String>,
    swagger: bool,
}

impl TestAppBuilder {
    /// App backed by [`sample_repo`].
    pub fn with_mocks() -> Self {
        Self::with_repo(Arc::new(sample_repo()))
    }

    /// App backed by the given repository.
    pub fn with_repo(repo: Arc<dyn VoteLogRepository>) -> Self {
        Self {
            repo,
            settings: PageSettings::default(),
            cors_origins: Vec::new(),
            swagger: false,
        }
    }

    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors_origins = origins.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PageSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub const fn with_swagger(mut self) -> Self {
        self.swagger = true;
        self
    }

    pub fn build(self) -> Router {
        let cors = CorsConfig {
            allowed_origins: self.cors_origins,
        };
        build_router(
            AppState::new(self.repo, self.settings),
            &cors,
            self.swagger,
        )
    }
}
