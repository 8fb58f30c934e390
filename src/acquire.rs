//! The acquisition loop.
//!
//! Pages through search results, downloads each hit, runs it through the
//! transform pipeline, and stops as soon as one of these holds:
//!
//! - the quota is reached (no further request of any kind is made),
//! - a page comes back empty,
//! - a page has no continuation indicator,
//! - a search request fails.
//!
//! Only items fail individually: a download or transform error is reported
//! as [`AcquireEvent::ItemFailed`] and the loop moves to the next record.
//! Nothing here is fatal; the worst outcome is an empty collection.
//!
//! ## Rate limiting
//!
//! The loop sleeps for [`AcquireSettings::page_delay`] between page
//! requests. It never sleeps before the first page or after the last.

use crate::download::Downloader;
use crate::imaging::{ImageTransform, ProcessedImage};
use crate::search::SearchClient;
use std::sync::mpsc::Sender;
use std::time::Duration;
use tracing::warn;

/// Knobs for one acquisition run.
#[derive(Debug, Clone)]
pub struct AcquireSettings {
    pub quota: usize,
    pub per_page: u32,
    pub page_delay: Duration,
}

impl Default for AcquireSettings {
    fn default() -> Self {
        Self {
            quota: 35,
            per_page: 15,
            page_delay: Duration::from_secs(1),
        }
    }
}

/// Processed images in processing order, never more than the quota.
#[derive(Debug, Clone)]
pub struct ImageCollection {
    quota: usize,
    images: Vec<ProcessedImage>,
}

impl ImageCollection {
    pub fn new(quota: usize) -> Self {
        Self {
            quota,
            images: Vec::new(),
        }
    }

    /// Append an image. Returns it back untouched when the quota is full.
    pub fn push(&mut self, image: ProcessedImage) -> Result<(), ProcessedImage> {
        if self.is_full() {
            return Err(image);
        }
        self.images.push(image);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.images.len() >= self.quota
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessedImage> {
        self.images.iter()
    }

    pub fn into_images(self) -> Vec<ProcessedImage> {
        self.images
    }
}

impl<'a> IntoIterator for &'a ImageCollection {
    type Item = &'a ProcessedImage;
    type IntoIter = std::slice::Iter<'a, ProcessedImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

/// Progress notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquireEvent {
    /// The typed keyword and the query it resolved to. Sent once per run,
    /// before the first page.
    QueryResolved { keyword: String, query: String },
    /// About to request this page.
    PageRequested { page: u32 },
    /// An image was added at 1-based position `index`.
    ImageAdded {
        index: usize,
        quota: usize,
        url: String,
        bytes: usize,
        quality: u8,
    },
    /// One record was skipped.
    ItemFailed { url: String, error: String },
    /// A search request failed; the loop ends here.
    SearchStopped { page: u32, error: String },
    /// The loop is done.
    Finished { collected: usize, quota: usize },
}

/// A failed item, kept for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub url: String,
    pub error: String,
}

/// Everything an acquisition run produced.
#[derive(Debug)]
pub struct AcquireReport {
    pub collection: ImageCollection,
    /// Search requests issued, failed ones included.
    pub pages_requested: u32,
    pub failures: Vec<ItemFailure>,
}

pub(crate) fn emit(events: Option<&Sender<AcquireEvent>>, event: AcquireEvent) {
    if let Some(tx) = events {
        // A hung-up receiver only loses progress output
        let _ = tx.send(event);
    }
}

/// Collect up to `settings.quota` processed images for `query`.
pub fn acquire(
    search: &impl SearchClient,
    downloader: &impl Downloader,
    transform: &mut impl ImageTransform,
    query: &str,
    settings: &AcquireSettings,
    events: Option<&Sender<AcquireEvent>>,
) -> AcquireReport {
    let mut collection = ImageCollection::new(settings.quota);
    let mut failures = Vec::new();
    let mut pages_requested = 0;
    let mut page = 1;

    while !collection.is_full() {
        emit(events, AcquireEvent::PageRequested { page });
        pages_requested += 1;
        let results = match search.search(query, page, settings.per_page) {
            Ok(results) => results,
            Err(e) => {
                warn!(page, error = %e, "search failed, stopping");
                emit(
                    events,
                    AcquireEvent::SearchStopped {
                        page,
                        error: e.to_string(),
                    },
                );
                break;
            }
        };
        if results.is_empty() {
            break;
        }

        for record in &results.photos {
            if collection.is_full() {
                break;
            }
            let outcome = downloader
                .download(&record.url)
                .map_err(|e| e.to_string())
                .and_then(|raw| transform.transform(&raw).map_err(|e| e.to_string()));

            match outcome {
                Ok(image) => {
                    let bytes = image.encoded_len();
                    let quality = image.quality.value();
                    if collection.push(image).is_ok() {
                        emit(
                            events,
                            AcquireEvent::ImageAdded {
                                index: collection.len(),
                                quota: settings.quota,
                                url: record.url.clone(),
                                bytes,
                                quality,
                            },
                        );
                    }
                }
                Err(error) => {
                    warn!(url = %record.url, %error, "skipping image");
                    emit(
                        events,
                        AcquireEvent::ItemFailed {
                            url: record.url.clone(),
                            error: error.clone(),
                        },
                    );
                    failures.push(ItemFailure {
                        url: record.url.clone(),
                        error,
                    });
                }
            }
        }

        if collection.is_full() || !results.has_more {
            break;
        }
        page += 1;
        if !settings.page_delay.is_zero() {
            std::thread::sleep(settings.page_delay);
        }
    }

    emit(
        events,
        AcquireEvent::Finished {
            collected: collection.len(),
            quota: settings.quota,
        },
    );

    AcquireReport {
        collection,
        pages_requested,
        failures,
    }
}
