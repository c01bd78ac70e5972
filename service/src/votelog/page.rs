//! Page models handed to the presentation layer.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use vl_core::{
    aggregate, summarize, Person, Tally, VoteChoice, VoteEvent, VoteGroups, VoteSummary,
    WaffleGrid,
};

use super::repo::{RepoError, VoteLogRepository};
use crate::config::SiteConfig;

/// Presentation settings applied while assembling pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub document_fallback_title: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

impl From<&SiteConfig> for PageSettings {
    fn from(site: &SiteConfig) -> Self {
        Self {
            document_fallback_title: site.document_fallback_title.clone(),
        }
    }
}

/// A downloadable document as shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DocumentLink {
    pub title: String,
    pub link: String,
}

/// Everything needed to draw one vote log page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct VoteLogPage {
    pub id: String,
    pub title: String,
    pub legal_title: String,
    pub meeting: String,
    pub vote_date: NaiveDate,
    /// `vote_date` as printed on the page (`DD.M.YYYY`).
    pub vote_date_display: String,
    pub description: String,
    pub reference: Option<String>,
    /// Published counts.
    pub tally: Tally,
    pub summary: VoteSummary,
    pub voters: VoteGroups,
    pub waffle: WaffleGrid,
    pub documents: Vec<DocumentLink>,
}

/// One line of the vote log index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct VoteLogSummaryItem {
    pub id: String,
    pub title: String,
    pub meeting: String,
    pub vote_date: NaiveDate,
    pub vote_date_display: String,
    pub summary: VoteSummary,
}

impl From<&VoteEvent> for VoteLogSummaryItem {
    fn from(event: &VoteEvent) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            meeting: event.meeting.clone(),
            vote_date: event.vote_date,
            vote_date_display: event.formatted_date(),
            summary: summarize(event),
        }
    }
}

/// Assembles pages from reference tables loaded once.
///
/// Building many pages with one assembler avoids re-reading choices and
/// people for every event.
pub struct PageAssembler {
    choices: Vec<VoteChoice>,
    people: Vec<Person>,
    settings: PageSettings,
}

impl PageAssembler {
    /// Load the reference tables from `repo`.
    ///
    /// # Errors
    /// Returns an error if the repository fails.
    pub fn new(repo: &dyn VoteLogRepository, settings: PageSettings) -> Result<Self, RepoError> {
        Ok(Self {
            choices: repo.vote_choices()?,
            people: repo.people()?,
            settings,
        })
    }

    #[must_use]
    pub fn assemble(&self, event: &VoteEvent) -> VoteLogPage {
        let voters = aggregate(event, &self.choices, &self.people);

        let counted = voters.counts();
        if counted != event.tally {
            tracing::debug!(
                vote_id = %event.id,
                ?counted,
                published = ?event.tally,
                "per-person records disagree with published tally"
            );
        }
        let unmatched = voters.unmatched().count();
        if unmatched > 0 {
            tracing::debug!(vote_id = %event.id, unmatched, "voters without a person record");
        }

        let documents = event
            .linked_documents()
            .filter_map(|doc| {
                doc.link.as_ref().map(|link| DocumentLink {
                    title: doc
                        .title
                        .as_deref()
                        .filter(|t| !t.trim().is_empty())
                        .unwrap_or(&self.settings.document_fallback_title)
                        .to_string(),
                    link: link.clone(),
                })
            })
            .collect();

        VoteLogPage {
            id: event.id.clone(),
            title: event.title.clone(),
            legal_title: event.legal_title.clone(),
            meeting: event.meeting.clone(),
            vote_date: event.vote_date,
            vote_date_display: event.formatted_date(),
            description: event.description.clone(),
            reference: event.reference.clone(),
            tally: event.tally,
            summary: summarize(event),
            waffle: WaffleGrid::from_groups(&voters),
            voters,
            documents,
        }
    }
}

/// Build the page for a single vote event.
///
/// # Errors
/// Returns `RepoError::NotFound` if `id` is unknown, or any repository failure.
pub fn build_page(
    repo: &dyn VoteLogRepository,
    id: &str,
    settings: &PageSettings,
) -> Result<VoteLogPage, RepoError> {
    let event = repo.vote_event(id)?;
    let assembler = PageAssembler::new(repo, settings.clone())?;
    Ok(assembler.assemble(&event))
}

/// List every vote event with its outcome, in source order.
///
/// # Errors
/// Returns an error if the repository fails.
pub fn build_index(repo: &dyn VoteLogRepository) -> Result<Vec<VoteLogSummaryItem>, RepoError> {
    Ok(repo
        .vote_events()?
        .iter()
        .map(VoteLogSummaryItem::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::votelog::mock::MockVoteLogRepository;
    use vl_core::{Document, VoteValue, WaffleSegment};

    fn person(id: &str, name: &str) -> Person {
        Person {
            id: id.to_string(),
            title: "นาย".to_string(),
            name: name.to_string(),
            lastname: "ทดสอบ".to_string(),
            is_senator: false,
            party: Some("Party".to_string()),
            slug: Some(format!("/people/{id}")),
        }
    }

    fn choice(person_id: &str, vote_id: &str, value: VoteValue) -> VoteChoice {
        VoteChoice {
            person_id: person_id.to_string(),
            vote_id: vote_id.to_string(),
            value,
        }
    }

    fn event() -> VoteEvent {
        VoteEvent {
            id: "v1".to_string(),
            title: "Budget bill".to_string(),
            legal_title: "Budget Act".to_string(),
            vote_date: NaiveDate::from_ymd_opt(2020, 3, 5).unwrap_or_default(),
            description: "First reading".to_string(),
            reference: Some("https://example.org/ref".to_string()),
            documents: vec![
                Document {
                    title: Some("Minutes".to_string()),
                    link: Some("https://example.org/minutes.pdf".to_string()),
                },
                Document {
                    title: Some("Unpublished".to_string()),
                    link: None,
                },
                Document {
                    title: None,
                    link: Some("https://example.org/record.pdf".to_string()),
                },
            ],
            meeting: "Session 1".to_string(),
            tally: Tally {
                approve: 2,
                disprove: 1,
                abstained: 0,
                absent: 1,
            },
        }
    }

    fn repo() -> MockVoteLogRepository {
        MockVoteLogRepository::new()
            .with_events(vec![event()])
            .with_people(vec![person("a", "A"), person("b", "B"), person("c", "C")])
            .with_choices(vec![
                choice("a", "v1", VoteValue::Approve),
                choice("b", "v1", VoteValue::Disprove),
                choice("c", "v1", VoteValue::Approve),
                choice("x", "v1", VoteValue::Absent),
            ])
    }

    #[test]
    fn assembles_full_page() {
        let page = build_page(&repo(), "v1", &PageSettings::default()).expect("page");

        assert_eq!(page.vote_date_display, "05.3.2020");
        assert_eq!(page.summary.total_voter, 3);
        assert!(page.summary.passed);
        assert_eq!(page.voters.approve.len(), 2);
        assert_eq!(page.voters.absent.len(), 1);
        assert!(page.voters.absent[0].person.is_none());
        assert_eq!(page.waffle.cells().count(), 4);
        assert_eq!(
            page.waffle
                .segments
                .iter()
                .filter(|s| matches!(s, WaffleSegment::Separator))
                .count(),
            3
        );
    }

    #[test]
    fn documents_without_link_are_dropped_and_titles_fall_back() {
        let settings = PageSettings {
            document_fallback_title: "Document".to_string(),
        };

        let page = build_page(&repo(), "v1", &settings).expect("page");

        assert_eq!(
            page.documents,
            vec![
                DocumentLink {
                    title: "Minutes".to_string(),
                    link: "https://example.org/minutes.pdf".to_string(),
                },
                DocumentLink {
                    title: "Document".to_string(),
                    link: "https://example.org/record.pdf".to_string(),
                },
            ]
        );
    }

    #[test]
    fn unknown_vote_is_not_found() {
        let repo = repo();
        let result = build_page(&repo, "v404", &PageSettings::default());
        assert!(matches!(result, Err(RepoError::NotFound(id)) if id == "v404"));
        assert_eq!(repo.vote_event_calls(), vec!["v404".to_string()]);
    }

    #[test]
    fn index_lists_events_with_outcome() {
        let index = build_index(&repo()).expect("index");
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].id, "v1");
        assert_eq!(index[0].vote_date_display, "05.3.2020");
        assert!(index[0].summary.passed);
    }

    #[test]
    fn repository_failure_propagates() {
        let repo = repo();
        repo.fail_with("unreadable");
        assert!(matches!(build_index(&repo), Err(RepoError::Invalid(_))));
    }
}
