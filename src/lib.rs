//! # Pixcrawl
//!
//! Fetch stock photos for a keyword, push each one through a fixed set of
//! randomized cosmetic edits, and deliver the batch as a single zip.
//!
//! # Architecture: One Sequential Run
//!
//! ```text
//! keyword ─▶ translate ─▶ search pages ─▶ download ─▶ transform ─▶ collection ─▶ zip
//!            (ko → en)    (Pexels API)     (HTTP)     (5 steps)    (≤ quota)
//! ```
//!
//! Every network and pixel seam is a trait, so the loop that ties them
//! together is tested with in-memory fakes:
//!
//! | Seam | Trait | Production type |
//! |------|-------|-----------------|
//! | translation | [`translate::Translator`] | [`translate::GoogleTranslator`] |
//! | photo search | [`search::SearchClient`] | [`search::PexelsClient`] |
//! | image fetch | [`download::Downloader`] | [`download::HttpDownloader`] |
//! | pixel pipeline | [`imaging::ImageTransform`] | [`imaging::RustPipeline`] |
//! | randomness | [`imaging::RandomSource`] | [`imaging::RngSource`] |
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`run`] | One keyword end to end: resolve the query, acquire, archive |
//! | [`acquire`] | The paginated search/download/transform loop and the bounded collection |
//! | [`search`] | Pexels search client and response parsing |
//! | [`download`] | Raw image fetches and the shared HTTP client |
//! | [`translate`] | Keyword translation through the public Google endpoint |
//! | [`imaging`] | Decode, downscale, crop, border, rotate, recompress |
//! | [`archive`] | Zip packaging with positional entry names |
//! | [`naming`] | Keyword → safe file and entry names |
//! | [`config`] | `pixcrawl.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting for progress events |
//!
//! # Design Decisions
//!
//! ## Item Failures Never Abort
//!
//! A dead link, an undecodable body, or a pixel step that fails costs one
//! image, not the run. Only two things are fatal: an empty keyword and a
//! failed translation, because without a query there is nothing to search.
//! A search request that fails ends the loop early with whatever was
//! already collected.
//!
//! ## Blocking HTTP
//!
//! The run is strictly sequential with a pause between pages, so a blocking
//! `reqwest` client is used rather than an async runtime. One client is built
//! per run and shared by search, download, and translation.
//!
//! ## Injected Randomness
//!
//! Crop side, border color, and rotation are drawn through
//! [`imaging::RandomSource`]. Production seeds a `StdRng` (from `--seed` or
//! the OS); tests script the draws to check exact geometry.

pub mod acquire;
pub mod archive;
pub mod config;
pub mod download;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod run;
pub mod search;
pub mod translate;

#[cfg(test)]
pub(crate) mod test_helpers;
