//! Record builders shared by the unit tests.

use chrono::NaiveDate;

use crate::{Person, Tally, VoteChoice, VoteEvent, VoteValue};

pub fn person(id: &str, title: &str, name: &str, lastname: &str) -> Person {
    Person {
        id: id.to_string(),
        title: title.to_string(),
        name: name.to_string(),
        lastname: lastname.to_string(),
        is_senator: false,
        party: None,
        slug: Some(format!("/people/{id}")),
    }
}

pub fn event(id: &str, date: &str, tally: Tally) -> VoteEvent {
    VoteEvent {
        id: id.to_string(),
        title: format!("Vote {id}"),
        legal_title: String::new(),
        vote_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_default(),
        description: String::new(),
        reference: None,
        documents: Vec::new(),
        meeting: String::new(),
        tally,
    }
}

pub fn choice(person_id: &str, vote_id: &str, value: VoteValue) -> VoteChoice {
    VoteChoice {
        person_id: person_id.to_string(),
        vote_id: vote_id.to_string(),
        value,
    }
}

/// `count` people named `p0..`, each voting `value` in `vote_id`.
pub fn crowd(count: usize, vote_id: &str, value: VoteValue) -> (Vec<Person>, Vec<VoteChoice>) {
    let people: Vec<_> = (0..count)
        .map(|i| person(&format!("p{i}"), "", &format!("Member{i}"), "Test"))
        .collect();
    let choices = people
        .iter()
        .map(|p| choice(&p.id, vote_id, value))
        .collect();
    (people, choices)
}
