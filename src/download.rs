//! Image downloads and the shared HTTP client.
//!
//! One blocking [`Client`] is built per process by [`build_http_client`] and
//! handed to every network collaborator (search, download, translate).

use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("download of {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Fetches the raw bytes behind a URL.
pub trait Downloader {
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// Build the process-wide HTTP client.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pixcrawl/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// [`Downloader`] over plain HTTP GET. Non-2xx responses are errors.
pub struct HttpDownloader {
    http: Client,
}

impl HttpDownloader {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes()?;
        debug!(url, bytes = bytes.len(), "downloaded");
        Ok(bytes.to_vec())
    }
}
