//! Joining vote choices to people and grouping them by outcome.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Person, Tally, VoteChoice, VoteEvent, VoteValue};

/// A vote choice joined with the person who cast it.
///
/// `person` is `None` when the choice names a person id that is not in the
/// people table. The entry is kept so that counts stay intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoterEntry {
    #[serde(flatten)]
    pub choice: VoteChoice,
    pub person: Option<Person>,
}

impl VoterEntry {
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        self.person.as_ref().map(Person::full_name)
    }
}

/// Voters of one event split into the four outcome groups.
///
/// Within a group, entries keep the order of the input choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteGroups {
    pub approve: Vec<VoterEntry>,
    pub disprove: Vec<VoterEntry>,
    pub abstained: Vec<VoterEntry>,
    pub absent: Vec<VoterEntry>,
}

impl VoteGroups {
    #[must_use]
    pub fn get(&self, value: VoteValue) -> &[VoterEntry] {
        match value {
            VoteValue::Approve => &self.approve,
            VoteValue::Disprove => &self.disprove,
            VoteValue::Abstained => &self.abstained,
            VoteValue::Absent => &self.absent,
        }
    }

    fn bucket_mut(&mut self, value: VoteValue) -> &mut Vec<VoterEntry> {
        match value {
            VoteValue::Approve => &mut self.approve,
            VoteValue::Disprove => &mut self.disprove,
            VoteValue::Abstained => &mut self.abstained,
            VoteValue::Absent => &mut self.absent,
        }
    }

    /// Groups in page order: approve, disprove, abstained, absent.
    pub fn iter(&self) -> impl Iterator<Item = (VoteValue, &[VoterEntry])> {
        VoteValue::ALL.into_iter().map(move |value| (value, self.get(value)))
    }

    /// Counts taken from the joined records, for comparison with the
    /// event's published tally. Nothing is reconciled.
    #[must_use]
    pub fn counts(&self) -> Tally {
        let count = |entries: &[VoterEntry]| u32::try_from(entries.len()).unwrap_or(u32::MAX);
        Tally {
            approve: count(&self.approve),
            disprove: count(&self.disprove),
            abstained: count(&self.abstained),
            absent: count(&self.absent),
        }
    }

    /// Entries whose person id had no match.
    pub fn unmatched(&self) -> impl Iterator<Item = &VoterEntry> {
        self.iter()
            .flat_map(|(_, entries)| entries.iter())
            .filter(|entry| entry.person.is_none())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.approve.len() + self.disprove.len() + self.abstained.len() + self.absent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group the choices cast in `event` by outcome, joined to `people` on id.
///
/// Choices for other events are ignored. If `people` holds the same id
/// twice, the first record wins.
#[must_use]
pub fn aggregate(event: &VoteEvent, choices: &[VoteChoice], people: &[Person]) -> VoteGroups {
    let mut index: HashMap<&str, &Person> = HashMap::with_capacity(people.len());
    for person in people {
        index.entry(person.id.as_str()).or_insert(person);
    }

    let mut groups = VoteGroups::default();
    for choice in choices.iter().filter(|c| c.vote_id == event.id) {
        let person = index.get(choice.person_id.as_str()).map(|p| (*p).clone());
        groups.bucket_mut(choice.value).push(VoterEntry {
            choice: choice.clone(),
            person,
        });
    }
    groups
}
