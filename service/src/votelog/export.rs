//! Writing page models to disk for the static site build.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::page::{PageAssembler, PageSettings, VoteLogSummaryItem};
use super::repo::{RepoError, VoteLogRepository};

/// File name of the index written next to the pages.
pub const INDEX_FILE: &str = "index.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize page {id}: {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// What an export run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub pages: Vec<PathBuf>,
    pub index: PathBuf,
}

/// Write `<out_dir>/<id>.json` for each vote event and an `index.json`
/// listing every event.
///
/// An empty `only` exports every page. Otherwise only the named pages are
/// written, in source order, and an unknown id is an error. The index always
/// covers all events so pages from earlier runs stay listed.
///
/// # Errors
/// Returns an error if the repository fails, an id in `only` is unknown, or
/// a file cannot be written.
pub fn export_pages(
    repo: &dyn VoteLogRepository,
    settings: &PageSettings,
    out_dir: &Path,
    only: &[String],
) -> Result<ExportReport, ExportError> {
    let events = repo.vote_events()?;
    if let Some(missing) = only.iter().find(|id| !events.iter().any(|e| &e.id == *id)) {
        return Err(RepoError::NotFound(missing.clone()).into());
    }
    let selected = events
        .iter()
        .filter(|event| only.is_empty() || only.contains(&event.id))
        .map(|event| page_file_name(&event.id).map(|name| (event, name)))
        .collect::<Result<Vec<_>, _>>()?;

    fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let assembler = PageAssembler::new(repo, settings.clone())?;
    let mut pages = Vec::with_capacity(selected.len());
    for (event, file_name) in selected {
        let page = assembler.assemble(event);
        let path = out_dir.join(file_name);
        write_json(&path, &event.id, &page)?;
        tracing::debug!(vote_id = %event.id, path = %path.display(), "wrote page");
        pages.push(path);
    }

    let index: Vec<VoteLogSummaryItem> = events.iter().map(VoteLogSummaryItem::from).collect();
    let index_path = out_dir.join(INDEX_FILE);
    write_json(&index_path, "index", &index)?;
    tracing::info!(
        pages = pages.len(),
        out_dir = %out_dir.display(),
        "exported vote-log pages"
    );

    Ok(ExportReport {
        pages,
        index: index_path,
    })
}

/// Event ids become file names, so they must stay inside `out_dir` and must
/// not collide with the index.
fn page_file_name(id: &str) -> Result<String, RepoError> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(RepoError::Invalid(format!(
            "vote event id '{id}' cannot be used as a file name"
        )));
    }
    let name = format!("{id}.json");
    if name == INDEX_FILE {
        return Err(RepoError::Invalid(format!(
            "vote event id '{id}' is reserved for the index file"
        )));
    }
    Ok(name)
}

fn write_json<T: Serialize>(path: &Path, id: &str, value: &T) -> Result<(), ExportError> {
    let json = serde_json::to_vec_pretty(value).map_err(|source| ExportError::Serialize {
        id: id.to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
