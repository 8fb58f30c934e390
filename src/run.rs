//! One keyword, start to finish.
//!
//! ```text
//! keyword ─trim─▶ translate ─▶ acquire ─▶ build_archive
//!    │               │                        │
//!  empty?         failure?              empty collection?
//!    ▼               ▼                        ▼
//! EmptyKeyword   Translation          NothingToDownload
//! ```
//!
//! Only the two left-hand failures are errors. Everything the acquisition
//! loop runs into degrades toward "fewer images", and zero images is an
//! outcome of its own rather than an error.

use crate::acquire::{AcquireEvent, AcquireReport, AcquireSettings, acquire, emit};
use crate::archive::{Archive, ArchiveError, build_archive};
use crate::download::Downloader;
use crate::imaging::ImageTransform;
use crate::search::SearchClient;
use crate::translate::{TranslationError, Translator};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("keyword is empty")]
    EmptyKeyword,
    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),
    #[error("archive failed: {0}")]
    Archive(#[from] ArchiveError),
}

/// Input of one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub keyword: String,
    /// `None` searches with the keyword as typed.
    pub languages: Option<(String, String)>,
    pub acquire: AcquireSettings,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Archive {
        query: String,
        archive: Archive,
        report: AcquireReport,
    },
    /// No image survived; there is nothing to deliver.
    NothingToDownload { query: String, report: AcquireReport },
}

impl RunOutcome {
    pub fn query(&self) -> &str {
        match self {
            RunOutcome::Archive { query, .. } | RunOutcome::NothingToDownload { query, .. } => {
                query
            }
        }
    }

    pub fn report(&self) -> &AcquireReport {
        match self {
            RunOutcome::Archive { report, .. } | RunOutcome::NothingToDownload { report, .. } => {
                report
            }
        }
    }
}

/// Turn the typed keyword into the search query.
///
/// Identical source and target languages skip the service.
pub fn resolve_query(
    translator: &impl Translator,
    keyword: &str,
    languages: Option<(&str, &str)>,
) -> Result<String, RunError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(RunError::EmptyKeyword);
    }
    match languages {
        Some((source, target)) if !source.eq_ignore_ascii_case(target) => {
            Ok(translator.translate(keyword, source, target)?)
        }
        _ => Ok(keyword.to_string()),
    }
}

/// Translate, acquire, and archive.
pub fn run(
    translator: &impl Translator,
    search: &impl SearchClient,
    downloader: &impl Downloader,
    transform: &mut impl ImageTransform,
    options: &RunOptions,
    events: Option<&Sender<AcquireEvent>>,
) -> Result<RunOutcome, RunError> {
    let languages = options
        .languages
        .as_ref()
        .map(|(s, t)| (s.as_str(), t.as_str()));
    let query = resolve_query(translator, &options.keyword, languages)?;
    info!(keyword = %options.keyword, %query, "query resolved");
    emit(
        events,
        AcquireEvent::QueryResolved {
            keyword: options.keyword.trim().to_string(),
            query: query.clone(),
        },
    );

    let report = acquire(search, downloader, transform, &query, &options.acquire, events);
    info!(
        collected = report.collection.len(),
        pages = report.pages_requested,
        failures = report.failures.len(),
        "acquisition finished"
    );

    match build_archive(&report.collection, &query) {
        Ok(archive) => Ok(RunOutcome::Archive {
            query,
            archive,
            report,
        }),
        Err(ArchiveError::Empty) => Ok(RunOutcome::NothingToDownload { query, report }),
        Err(e) => Err(e.into()),
    }
}
