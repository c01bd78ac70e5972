//! Vote-log data access and page assembly.
//!
//! # Architecture
//!
//! Page assembly never touches files directly. It goes through the
//! [`VoteLogRepository`] trait:
//!
//! - [`VoteLogRepository`] - Trait defining the data operations
//! - [`YamlVoteLogRepository`] - Loads the site's YAML data files once
//! - [`mock::MockVoteLogRepository`] - In-memory data for tests (behind `test-utils`)
//!
//! On top of the repository, [`PageAssembler`] joins events, choices and
//! people into [`VoteLogPage`] models, and [`export_pages`] writes them out as
//! JSON for the static presentation layer.
//!
//! # Testing Patterns
//!
//! ```ignore
//! use votelog_api::votelog::{build_page, mock::MockVoteLogRepository, PageSettings};
//!
//! let repo = MockVoteLogRepository::new()
//!     .with_events(vec![event])
//!     .with_people(people)
//!     .with_choices(choices);
//!
//! let page = build_page(&repo, "v1", &PageSettings::default())?;
//! assert!(page.summary.passed);
//! ```

mod export;
mod page;
mod repo;
mod yaml;

pub use export::{export_pages, ExportError, ExportReport, INDEX_FILE};
pub use page::{
    build_index, build_page, DocumentLink, PageAssembler, PageSettings, VoteLogPage,
    VoteLogSummaryItem,
};
pub use repo::{RepoError, VoteLogRepository};
pub use yaml::YamlVoteLogRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use repo::mock;
