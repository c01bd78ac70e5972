//! Repository trait for vote-log records.

use std::path::PathBuf;

use thiserror::Error;
use vl_core::{Person, VoteChoice, VoteEvent};

/// Errors that can occur while loading or querying vote-log data.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No vote event with this id
    #[error("vote log not found: {0}")]
    NotFound(String),

    /// A data file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not valid YAML for its record type
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The records break a data invariant
    #[error("invalid vote-log data: {0}")]
    Invalid(String),
}

/// Read access to vote events, vote choices and people.
///
/// All methods return records in source order; aggregation relies on the
/// order of [`vote_choices`](Self::vote_choices).
pub trait VoteLogRepository: Send + Sync {
    /// Get a single vote event by id.
    ///
    /// # Errors
    /// Returns `RepoError::NotFound` if no event has this id.
    fn vote_event(&self, id: &str) -> Result<VoteEvent, RepoError>;

    /// List all vote events.
    ///
    /// # Errors
    /// Returns an error if the underlying store fails.
    fn vote_events(&self) -> Result<Vec<VoteEvent>, RepoError>;

    /// List every vote choice across all events.
    ///
    /// # Errors
    /// Returns an error if the underlying store fails.
    fn vote_choices(&self) -> Result<Vec<VoteChoice>, RepoError>;

    /// List all people.
    ///
    /// # Errors
    /// Returns an error if the underlying store fails.
    fn people(&self) -> Result<Vec<Person>, RepoError>;
}

/// Mock implementation for testing.
#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod mock {
    use std::sync::Mutex;

    use super::{RepoError, VoteLogRepository};
    use vl_core::{Person, VoteChoice, VoteEvent};

    /// In-memory repository that records lookups.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let repo = MockVoteLogRepository::new().with_events(vec![event]);
    /// repo.fail_with("disk on fire");
    /// assert!(repo.vote_events().is_err());
    /// ```
    pub struct MockVoteLogRepository {
        events: Vec<VoteEvent>,
        choices: Vec<VoteChoice>,
        people: Vec<Person>,
        failure: Mutex<Option<String>>,
        vote_event_calls: Mutex<Vec<String>>,
    }

    impl MockVoteLogRepository {
        /// Create an empty mock.
        pub fn new() -> Self {
            Self {
                events: Vec::new(),
                choices: Vec::new(),
                people: Vec::new(),
                failure: Mutex::new(None),
                vote_event_calls: Mutex::new(Vec::new()),
            }
        }

        #[must_use]
        pub fn with_events(mut self, events: Vec<VoteEvent>) -> Self {
            self.events = events;
            self
        }

        #[must_use]
        pub fn with_choices(mut self, choices: Vec<VoteChoice>) -> Self {
            self.choices = choices;
            self
        }

        #[must_use]
        pub fn with_people(mut self, people: Vec<Person>) -> Self {
            self.people = people;
            self
        }

        /// Make every subsequent call fail with `RepoError::Invalid(message)`.
        pub fn fail_with(&self, message: &str) {
            *self.failure.lock().unwrap() = Some(message.to_string());
        }

        /// Get all ids passed to `vote_event`.
        pub fn vote_event_calls(&self) -> Vec<String> {
            self.vote_event_calls.lock().unwrap().clone()
        }

        fn check(&self) -> Result<(), RepoError> {
            match self.failure.lock().unwrap().as_ref() {
                Some(message) => Err(RepoError::Invalid(message.clone())),
                None => Ok(()),
            }
        }
    }

    impl Default for MockVoteLogRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl VoteLogRepository for MockVoteLogRepository {
        fn vote_event(&self, id: &str) -> Result<VoteEvent, RepoError> {
            self.vote_event_calls.lock().unwrap().push(id.to_string());
            self.check()?;

            self.events
                .iter()
                .find(|event| event.id == id)
                .cloned()
                .ok_or_else(|| RepoError::NotFound(id.to_string()))
        }

        fn vote_events(&self) -> Result<Vec<VoteEvent>, RepoError> {
            self.check()?;
            Ok(self.events.clone())
        }

        fn vote_choices(&self) -> Result<Vec<VoteChoice>, RepoError> {
            self.check()?;
            Ok(self.choices.clone())
        }

        fn people(&self) -> Result<Vec<Person>, RepoError> {
            self.check()?;
            Ok(self.people.clone())
        }
    }
}
