//! Common test utilities for integration tests.
//!
//! - [`app_builder::TestAppBuilder`] - Build test Axum apps through the same
//!   `build_router` that main.rs uses
//! - [`fixture_data_config`] - `DataConfig` pointing at `tests/fixtures/data`
//! - [`sample_repo`] - Mock repository with one passed and one failed vote

#![allow(dead_code)]

pub mod app_builder;

use chrono::NaiveDate;
use votelog_api::config::DataConfig;
use votelog_api::votelog::mock::MockVoteLogRepository;
use vl_core::{Document, Person, Tally, VoteChoice, VoteEvent, VoteValue};

/// Data config for the checked-in YAML fixtures.
pub fn fixture_data_config() -> DataConfig {
    DataConfig {
        dir: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/data").to_string(),
        ..DataConfig::default()
    }
}

pub fn person(id: &str, name: &str) -> Person {
    Person {
        id: id.to_string(),
        title: "นาย".to_string(),
        name: name.to_string(),
        lastname: "ทดสอบ".to_string(),
        is_senator: false,
        party: None,
        slug: Some(format!("/people/{id}")),
    }
}

pub fn choice(person_id: &str, vote_id: &str, value: VoteValue) -> VoteChoice {
    VoteChoice {
        person_id: person_id.to_string(),
        vote_id: vote_id.to_string(),
        value,
    }
}

pub fn event(id: &str, date: &str, tally: Tally) -> VoteEvent {
    VoteEvent {
        id: id.to_string(),
        title: format!("Vote {id}"),
        legal_title: String::new(),
        vote_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("fixture date"),
        description: String::new(),
        reference: None,
        documents: vec![Document {
            title: None,
            link: Some(format!("https://example.org/{id}.pdf")),
        }],
        meeting: "Session 1".to_string(),
        tally,
    }
}

/// Two events: `v1` passes 250/200/10/40, `v2` fails 1/2/0/0.
///
/// Only a handful of per-person records back `v1`; the published tally is
/// what decides the outcome.
pub fn sample_repo() -> MockVoteLogRepository {
    MockVoteLogRepository::new()
        .with_events(vec![
            event(
                "v1",
                "2020-01-10",
                Tally {
                    approve: 250,
                    disprove: 200,
                    abstained: 10,
                    absent: 40,
                },
            ),
            event(
                "v2",
                "2020-11-02",
                Tally {
                    approve: 1,
                    disprove: 2,
                    abstained: 0,
                    absent: 0,
                },
            ),
        ])
        .with_people(vec![person("a", "Anan"), person("b", "Boon"), person("c", "Chai")])
        .with_choices(vec![
            choice("a", "v1", VoteValue::Approve),
            choice("b", "v1", VoteValue::Disprove),
            choice("c", "v1", VoteValue::Absent),
            choice("a", "v2", VoteValue::Approve),
            choice("b", "v2", VoteValue::Disprove),
            choice("c", "v2", VoteValue::Disprove),
        ])
}
