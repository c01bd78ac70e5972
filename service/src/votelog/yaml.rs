//! Repository backed by the site's YAML data files.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use figment::providers::{Format, Yaml};
use serde::{de::DeserializeOwned, Deserialize};
use vl_core::{Person, VoteChoice, VoteEvent, VoteValue};

use super::repo::{RepoError, VoteLogRepository};
use crate::config::DataConfig;

/// One entry of `people_vote.yaml`: every vote a single person cast.
///
/// The name parts are optional and fill in what `people.yaml` leaves out.
#[derive(Debug, Deserialize)]
struct PeopleVoteRecord {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    lastname: Option<String>,
    #[serde(default)]
    votelog: Vec<VoteLogEntry>,
}

impl PeopleVoteRecord {
    fn has_name(&self) -> bool {
        self.name.is_some() || self.lastname.is_some()
    }

    /// Copy name parts into `person` where it has none.
    fn fill_name(&self, person: &mut Person) {
        for (field, value) in [
            (&mut person.title, &self.title),
            (&mut person.name, &self.name),
            (&mut person.lastname, &self.lastname),
        ] {
            if field.is_empty() {
                if let Some(value) = value {
                    field.clone_from(value);
                }
            }
        }
    }
}

/// Merge name parts from `people_vote.yaml` into the people table.
///
/// Records in `people.yaml` win field by field. A voter missing from
/// `people.yaml` but named in `people_vote.yaml` is appended.
fn merge_voter_names(people: &mut Vec<Person>, records: &[PeopleVoteRecord]) {
    for record in records {
        if let Some(person) = people.iter_mut().find(|p| p.id == record.id) {
            record.fill_name(person);
        } else if record.has_name() {
            let mut person = Person {
                id: record.id.clone(),
                title: String::new(),
                name: String::new(),
                lastname: String::new(),
                is_senator: false,
                party: None,
                slug: None,
            };
            record.fill_name(&mut person);
            people.push(person);
        }
    }
}

/// `key` is the vote event id.
#[derive(Debug, Deserialize)]
struct VoteLogEntry {
    key: String,
    value: VoteValue,
}

/// Vote-log data read once from disk and held in memory.
#[derive(Debug, Clone, Default)]
pub struct YamlVoteLogRepository {
    events: Vec<VoteEvent>,
    choices: Vec<VoteChoice>,
    people: Vec<Person>,
}

impl YamlVoteLogRepository {
    /// Read and validate the three data files named in `config`.
    ///
    /// # Errors
    /// Returns `RepoError::Io` or `RepoError::Parse` if a file cannot be
    /// loaded, and `RepoError::Invalid` if the records break an invariant.
    pub fn load(config: &DataConfig) -> Result<Self, RepoError> {
        let events: Vec<VoteEvent> = read_yaml(&config.votelog_path())?;
        let mut people: Vec<Person> = read_yaml(&config.people_path())?;
        let people_votes: Vec<PeopleVoteRecord> = read_yaml(&config.people_vote_path())?;
        merge_voter_names(&mut people, &people_votes);

        let choices = people_votes
            .into_iter()
            .flat_map(|record| {
                let person_id = record.id;
                record
                    .votelog
                    .into_iter()
                    .map(move |entry| VoteChoice {
                        person_id: person_id.clone(),
                        vote_id: entry.key,
                        value: entry.value,
                    })
            })
            .collect();

        let repo = Self::from_records(events, choices, people)?;
        tracing::info!(
            dir = %config.dir,
            vote_events = repo.events.len(),
            vote_choices = repo.choices.len(),
            people = repo.people.len(),
            "loaded vote-log data"
        );
        Ok(repo)
    }

    /// Build a repository from records already in memory, applying the same
    /// checks as [`load`](Self::load).
    ///
    /// # Errors
    /// Returns `RepoError::Invalid` if event ids repeat, a person votes twice
    /// in one event, or a choice names an unknown event.
    pub fn from_records(
        events: Vec<VoteEvent>,
        choices: Vec<VoteChoice>,
        people: Vec<Person>,
    ) -> Result<Self, RepoError> {
        let mut event_ids = HashSet::with_capacity(events.len());
        for event in &events {
            if !event_ids.insert(event.id.as_str()) {
                return Err(RepoError::Invalid(format!(
                    "vote event '{}' is defined more than once",
                    event.id
                )));
            }
        }

        let mut seen: HashMap<(&str, &str), VoteValue> = HashMap::with_capacity(choices.len());
        for choice in &choices {
            if !event_ids.contains(choice.vote_id.as_str()) {
                return Err(RepoError::Invalid(format!(
                    "person '{}' has a vote for unknown vote event '{}'",
                    choice.person_id, choice.vote_id
                )));
            }
            let key = (choice.person_id.as_str(), choice.vote_id.as_str());
            if seen.insert(key, choice.value).is_some() {
                return Err(RepoError::Invalid(format!(
                    "person '{}' voted more than once in vote event '{}'",
                    choice.person_id, choice.vote_id
                )));
            }
        }

        let person_ids: HashSet<&str> = people.iter().map(|p| p.id.as_str()).collect();
        let mut unknown: Vec<&str> = choices
            .iter()
            .map(|c| c.person_id.as_str())
            .filter(|id| !person_ids.contains(id))
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        if !unknown.is_empty() {
            tracing::warn!(
                count = unknown.len(),
                person_ids = ?unknown,
                "vote choices reference people missing from the people table"
            );
        }

        Ok(Self {
            events,
            choices,
            people,
        })
    }
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, RepoError> {
    let source = std::fs::read_to_string(path).map_err(|source| RepoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Yaml::from_str(&source).map_err(|e| RepoError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl VoteLogRepository for YamlVoteLogRepository {
    fn vote_event(&self, id: &str) -> Result<VoteEvent, RepoError> {
        self.events
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    fn vote_events(&self) -> Result<Vec<VoteEvent>, RepoError> {
        Ok(self.events.clone())
    }

    fn vote_choices(&self) -> Result<Vec<VoteChoice>, RepoError> {
        Ok(self.choices.clone())
    }

    fn people(&self) -> Result<Vec<Person>, RepoError> {
        Ok(self.people.clone())
    }
}
