use serde::Serialize;

use crate::model::{Tally, VoteEvent};

/// Outcome line shown at the top of a vote log page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteSummary {
    pub passed: bool,
    /// Members eligible to vote, absent members excluded.
    pub total_voter: u32,
}

impl From<&Tally> for VoteSummary {
    fn from(tally: &Tally) -> Self {
        Self {
            passed: tally.passed(),
            total_voter: tally.total_voter(),
        }
    }
}

/// Summarize an event from its published tally.
///
/// Per-person choices are not consulted.
#[must_use]
pub fn summarize(event: &VoteEvent) -> VoteSummary {
    VoteSummary::from(&event.tally)
}
