//! Waffle grid layout.
//!
//! Each outcome group is drawn as blocks of [`BLOCK_SIZE`] cells, each block
//! made of rows of [`ROW_SIZE`] cells (25 columns by 4 rows when full). A
//! separator sits between consecutive groups.

use serde::Serialize;

use crate::aggregate::{VoteGroups, VoterEntry};
use crate::model::VoteValue;

/// Cells per block.
pub const BLOCK_SIZE: usize = 100;
/// Cells per row inside a block.
pub const ROW_SIZE: usize = 25;

/// Split `items` into blocks of [`BLOCK_SIZE`], each split into rows of [`ROW_SIZE`].
///
/// Order is preserved and only the final block and row may be short.
#[must_use]
pub fn chunk_blocks<T>(items: &[T]) -> Vec<Vec<&[T]>> {
    items
        .chunks(BLOCK_SIZE)
        .map(|block| block.chunks(ROW_SIZE).collect())
        .collect()
}

/// One square of the grid: a single voter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WaffleCell {
    pub person_id: String,
    /// Tooltip text. Missing when the person record was not found.
    pub full_name: Option<String>,
    /// Link target for the tooltip.
    pub slug: Option<String>,
}

impl From<&VoterEntry> for WaffleCell {
    fn from(entry: &VoterEntry) -> Self {
        Self {
            person_id: entry.choice.person_id.clone(),
            full_name: entry.full_name(),
            slug: entry.person.as_ref().and_then(|p| p.slug.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WaffleBlock {
    pub rows: Vec<Vec<WaffleCell>>,
}

impl WaffleBlock {
    pub fn cells(&self) -> impl Iterator<Item = &WaffleCell> {
        self.rows.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WaffleSegment {
    Group {
        vote: VoteValue,
        blocks: Vec<WaffleBlock>,
    },
    Separator,
}

/// The whole chart: groups in page order with separators between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WaffleGrid {
    pub segments: Vec<WaffleSegment>,
}

impl WaffleGrid {
    /// Lay out any sequence of groups. Empty groups still get a segment so
    /// that separator placement only depends on group position.
    #[must_use]
    pub fn build<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (VoteValue, &'a [VoterEntry])>,
    {
        let groups: Vec<_> = groups.into_iter().collect();
        let last = groups.len().saturating_sub(1);

        let mut segments = Vec::with_capacity(groups.len() * 2);
        for (position, (vote, entries)) in groups.into_iter().enumerate() {
            let blocks = chunk_blocks(entries)
                .into_iter()
                .map(|rows| WaffleBlock {
                    rows: rows
                        .into_iter()
                        .map(|row| row.iter().map(WaffleCell::from).collect())
                        .collect(),
                })
                .collect();
            segments.push(WaffleSegment::Group { vote, blocks });
            if position < last {
                segments.push(WaffleSegment::Separator);
            }
        }

        Self { segments }
    }

    /// Lay out the four outcome groups of an aggregated event.
    #[must_use]
    pub fn from_groups(groups: &VoteGroups) -> Self {
        Self::build(groups.iter())
    }

    /// Blocks of one outcome group, if present.
    #[must_use]
    pub fn blocks(&self, value: VoteValue) -> Option<&[WaffleBlock]> {
        self.segments.iter().find_map(|segment| match segment {
            WaffleSegment::Group { vote, blocks } if *vote == value => Some(blocks.as_slice()),
            _ => None,
        })
    }

    /// Every cell in drawing order.
    pub fn cells(&self) -> impl Iterator<Item = &WaffleCell> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                WaffleSegment::Group { blocks, .. } => Some(blocks),
                WaffleSegment::Separator => None,
            })
            .flatten()
            .flat_map(WaffleBlock::cells)
    }
}
