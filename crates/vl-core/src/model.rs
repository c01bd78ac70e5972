//! Vote-log records as they arrive from the data layer.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A legislator or other voting member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Person {
    pub id: String,
    /// Honorific, written directly in front of the given name.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub is_senator: bool,
    #[serde(default)]
    pub party: Option<String>,
    /// Path of the person's detail page.
    #[serde(default)]
    pub slug: Option<String>,
}

impl Person {
    /// Display name: honorific and given name run together, then the family name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}{} {}", self.title, self.name, self.lastname)
    }
}

/// Error returned when a vote value is outside `1..=4`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vote value: {0:?}")]
pub struct VoteValueError(String);

/// How a single person voted.
///
/// Source data writes these as the codes `1` to `4`, either as integers or
/// as strings. Serialized output uses the lowercase label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    Approve = 1,
    Disprove = 2,
    Abstained = 3,
    Absent = 4,
}

impl VoteValue {
    /// All values in code order. Group order on the page follows this.
    pub const ALL: [Self; 4] = [Self::Approve, Self::Disprove, Self::Abstained, Self::Absent];

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Disprove => "disprove",
            Self::Abstained => "abstained",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for VoteValue {
    type Error = VoteValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Approve),
            2 => Ok(Self::Disprove),
            3 => Ok(Self::Abstained),
            4 => Ok(Self::Absent),
            other => Err(VoteValueError(other.to_string())),
        }
    }
}

impl FromStr for VoteValue {
    type Err = VoteValueError;

    /// Accepts a numeric code (`"1"`) or a label (`"approve"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::try_from(code);
        }
        Self::ALL
            .into_iter()
            .find(|value| value.label() == trimmed)
            .ok_or_else(|| VoteValueError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for VoteValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u8),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Self::try_from(code),
            Raw::Text(text) => text.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

/// One person's recorded choice in one vote event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteChoice {
    pub person_id: String,
    pub vote_id: String,
    pub value: VoteValue,
}

/// A supporting document attached to a vote event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Document {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Official counts published with a vote event.
///
/// These come from the event record itself and are independent of the
/// per-person choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Tally {
    #[serde(default)]
    pub approve: u32,
    #[serde(default)]
    pub disprove: u32,
    #[serde(default)]
    pub abstained: u32,
    #[serde(default)]
    pub absent: u32,
}

impl Tally {
    #[must_use]
    pub const fn get(&self, value: VoteValue) -> u32 {
        match value {
            VoteValue::Approve => self.approve,
            VoteValue::Disprove => self.disprove,
            VoteValue::Abstained => self.abstained,
            VoteValue::Absent => self.absent,
        }
    }

    /// Members eligible to vote. Absent members are not counted.
    ///
    /// Saturates at `u32::MAX` instead of overflowing.
    #[must_use]
    pub const fn total_voter(&self) -> u32 {
        self.approve
            .saturating_add(self.disprove)
            .saturating_add(self.abstained)
    }

    /// Simple majority of approvals over disprovals. A tie does not pass.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.approve > self.disprove
    }
}

/// A single recorded legislative vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub legal_title: String,
    pub vote_date: NaiveDate,
    #[serde(default, alias = "description_th")]
    pub description: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, alias = "document")]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub meeting: String,
    #[serde(flatten)]
    pub tally: Tally,
}

impl VoteEvent {
    /// Vote date as shown on the page, e.g. `05.3.2020`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.vote_date.format("%d.%-m.%Y").to_string()
    }

    /// Documents that can actually be downloaded, in their original order.
    pub fn linked_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|doc| doc.link.is_some())
    }
}
