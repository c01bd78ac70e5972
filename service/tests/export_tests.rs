//! Tests for writing page models to disk.

mod common;

use std::path::{Path, PathBuf};

use common::{event, sample_repo};
use figment::Jail;
use serde_json::Value;
use vl_core::Tally;
use votelog_api::votelog::{
    export_pages, mock::MockVoteLogRepository, ExportError, PageSettings, RepoError, INDEX_FILE,
};

fn read_json(path: &Path) -> Value {
    let bytes = std::fs::read(path).expect("read exported file");
    serde_json::from_slice(&bytes).expect("exported file is json")
}

fn index_ids(out: &Path) -> Vec<String> {
    read_json(&out.join(INDEX_FILE))
        .as_array()
        .expect("index array")
        .iter()
        .map(|item| item["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn test_export_writes_every_page_and_index() {
    Jail::expect_with(|_jail| {
        let out = Path::new("public/votelog");

        let report = export_pages(&sample_repo(), &PageSettings::default(), out, &[])
            .map_err(|e| e.to_string())?;

        assert_eq!(
            report.pages,
            vec![out.join("v1.json"), out.join("v2.json")]
        );
        assert_eq!(report.index, out.join(INDEX_FILE));

        let page = read_json(&out.join("v1.json"));
        assert_eq!(page["id"], "v1");
        assert_eq!(page["summary"]["total_voter"], 460);

        let index = read_json(&report.index);
        let ids: Vec<&str> = index
            .as_array()
            .expect("index array")
            .iter()
            .map(|item| item["id"].as_str().expect("id"))
            .collect();
        assert_eq!(ids, ["v1", "v2"]);
        Ok(())
    });
}

#[test]
fn test_export_only_selected_events() {
    Jail::expect_with(|_jail| {
        let out = PathBuf::from("out");

        let report = export_pages(
            &sample_repo(),
            &PageSettings::default(),
            &out,
            &["v2".to_string()],
        )
        .map_err(|e| e.to_string())?;

        assert_eq!(report.pages, vec![out.join("v2.json")]);
        assert!(!out.join("v1.json").exists());
        assert_eq!(index_ids(&out), ["v1", "v2"]);
        Ok(())
    });
}

#[test]
fn test_partial_export_keeps_every_event_in_index() {
    Jail::expect_with(|_jail| {
        let out = PathBuf::from("out");
        let repo = sample_repo();
        let settings = PageSettings::default();

        export_pages(&repo, &settings, &out, &[]).map_err(|e| e.to_string())?;
        export_pages(&repo, &settings, &out, &["v2".to_string()]).map_err(|e| e.to_string())?;

        assert!(out.join("v1.json").exists());
        assert_eq!(index_ids(&out), ["v1", "v2"]);
        Ok(())
    });
}

#[test]
fn test_export_rejects_id_that_collides_with_index() {
    Jail::expect_with(|_jail| {
        let repo = MockVoteLogRepository::new().with_events(vec![
            event("index", "2020-01-10", Tally::default()),
            event("v2", "2020-01-11", Tally::default()),
        ]);
        let out = PathBuf::from("out");

        let result = export_pages(&repo, &PageSettings::default(), &out, &[]);

        assert!(matches!(
            result,
            Err(ExportError::Repo(RepoError::Invalid(msg))) if msg.contains("reserved")
        ));
        assert!(!out.exists());
        Ok(())
    });
}

#[test]
fn test_export_unknown_id_writes_nothing() {
    Jail::expect_with(|_jail| {
        let out = PathBuf::from("out");

        let result = export_pages(
            &sample_repo(),
            &PageSettings::default(),
            &out,
            &["v404".to_string()],
        );

        assert!(matches!(
            result,
            Err(ExportError::Repo(RepoError::NotFound(id))) if id == "v404"
        ));
        assert!(!out.exists());
        Ok(())
    });
}

#[test]
fn test_export_rejects_path_like_ids() {
    Jail::expect_with(|_jail| {
        let repo = MockVoteLogRepository::new().with_events(vec![
            event("ok", "2020-01-10", Tally::default()),
            event("../escape", "2020-01-10", Tally::default()),
        ]);
        let out = PathBuf::from("out");

        let result = export_pages(&repo, &PageSettings::default(), &out, &[]);

        assert!(matches!(
            result,
            Err(ExportError::Repo(RepoError::Invalid(_)))
        ));
        assert!(!out.exists());
        Ok(())
    });
}

#[test]
fn test_export_propagates_repository_failure() {
    Jail::expect_with(|_jail| {
        let repo = sample_repo();
        repo.fail_with("unreadable");

        let result = export_pages(&repo, &PageSettings::default(), Path::new("out"), &[]);

        assert!(matches!(result, Err(ExportError::Repo(_))));
        Ok(())
    });
}
