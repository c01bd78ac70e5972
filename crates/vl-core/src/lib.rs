//! Vote-log aggregation for the Votelog transparency site.
//!
//! A vote log page shows one legislative vote: who approved, who disproved,
//! who abstained and who was absent, laid out as a waffle grid. This crate
//! holds the record types and the pure functions that shape them:
//!
//! - [`aggregate`] joins vote choices to people and groups them by outcome
//! - [`summarize`] derives pass/fail and the eligible-voter count from the
//!   event's own tallies
//! - [`WaffleGrid`] lays the groups out in blocks of 100 and rows of 25
//!
//! Nothing here performs I/O. Records are loaded by the caller and passed in.

mod aggregate;
mod grid;
mod model;
mod summary;

pub use aggregate::{aggregate, VoteGroups, VoterEntry};
pub use grid::{
    chunk_blocks, WaffleBlock, WaffleCell, WaffleGrid, WaffleSegment, BLOCK_SIZE, ROW_SIZE,
};
pub use model::{Document, Person, Tally, VoteChoice, VoteEvent, VoteValue, VoteValueError};
pub use summary::{summarize, VoteSummary};

#[cfg(test)]
pub(crate) mod fixtures;
