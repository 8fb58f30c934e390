//! Photo search client.
//!
//! [`SearchClient`] is the seam the acquisition loop pages through.
//! [`PexelsClient`] is the production implementation: one blocking GET per
//! page against the Pexels `/v1/search` endpoint.
//!
//! ## Response tolerance
//!
//! The API is treated as unreliable. Parsing goes through
//! [`parse_search_page`], which never panics:
//!
//! | Response | Result |
//! |---|---|
//! | JSON with non-empty `photos` | page with the records that have `src.original` |
//! | JSON without `photos`, any status | empty page (end of results) |
//! | non-JSON body, non-2xx status | [`SearchError::Status`] |
//! | non-JSON body, 2xx status | [`SearchError::Malformed`] |
//!
//! A page has more results after it only if `next_page` is present and is
//! neither `null` nor `false`.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search API returned status {status} with an unreadable body")]
    Status { status: u16 },
    #[error("malformed search response: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// One search hit. Only the original-resolution URL is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: u64,
    pub url: String,
}

/// One page of search hits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultPage {
    pub photos: Vec<PhotoRecord>,
    /// Continuation indicator: the API reported a next page.
    pub has_more: bool,
}

impl SearchResultPage {
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Source of paginated search results.
pub trait SearchClient {
    /// Fetch page `page` (1-based) of `per_page` results for `query`.
    fn search(&self, query: &str, page: u32, per_page: u32)
    -> Result<SearchResultPage, SearchError>;
}

/// Pexels search API client.
pub struct PexelsClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl PexelsClient {
    pub fn new(http: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// The GET for one page, not yet sent.
    pub fn request(&self, query: &str, page: u32, per_page: u32) -> RequestBuilder {
        self.http
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.api_key)
            .query(&[("query", query)])
            .query(&[("page", page), ("per_page", per_page)])
    }
}

impl SearchClient for PexelsClient {
    fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResultPage, SearchError> {
        debug!(query, page, per_page, "searching");
        let response = self.request(query, page, per_page).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        let parsed = parse_search_page(status, &body)?;
        debug!(
            status,
            photos = parsed.photos.len(),
            has_more = parsed.has_more,
            "search page received"
        );
        Ok(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    photos: Option<Vec<RawPhoto>>,
    #[serde(default)]
    next_page: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    src: Option<RawSrc>,
}

#[derive(Debug, Deserialize)]
struct RawSrc {
    #[serde(default)]
    original: Option<String>,
}

/// Turn a status code and body into a page. See the module docs for the table.
pub fn parse_search_page(status: u16, body: &str) -> Result<SearchResultPage, SearchError> {
    let raw: RawPage = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(_) if !(200..300).contains(&status) => return Err(SearchError::Status { status }),
        Err(e) => return Err(SearchError::Malformed(e)),
    };

    let photos: Vec<PhotoRecord> = raw
        .photos
        .unwrap_or_default()
        .into_iter()
        .filter_map(|photo| {
            let url = photo.src?.original.filter(|u| !u.is_empty())?;
            Some(PhotoRecord {
                id: photo.id.unwrap_or_default(),
                url,
            })
        })
        .collect();

    let has_more = match raw.next_page {
        None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => false,
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    };

    Ok(SearchResultPage { photos, has_more })
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock search client serving canned pages and recording every request.
    ///
    /// Page `n` is `pages[n - 1]`; pages past the end are empty.
    #[derive(Default)]
    pub struct MockSearch {
        pub pages: Vec<SearchResultPage>,
        pub requests: Mutex<Vec<(String, u32, u32)>>,
        pub fail_on_page: Option<u32>,
    }

    impl MockSearch {
        pub fn with_pages(pages: Vec<SearchResultPage>) -> Self {
            Self {
                pages,
                ..Self::default()
            }
        }

        pub fn requested_pages(&self) -> Vec<u32> {
            self.requests.lock().unwrap().iter().map(|r| r.1).collect()
        }
    }

    impl SearchClient for MockSearch {
        fn search(
            &self,
            query: &str,
            page: u32,
            per_page: u32,
        ) -> Result<SearchResultPage, SearchError> {
            self.requests
                .lock()
                .unwrap()
                .push((query.to_string(), page, per_page));
            if self.fail_on_page == Some(page) {
                return Err(SearchError::Status { status: 500 });
            }
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default())
        }
    }

    /// Page of `count` records with URLs `mock://{page}/{i}`.
    pub fn page_of(page: u32, count: usize, has_more: bool) -> SearchResultPage {
        SearchResultPage {
            photos: (1..=count)
                .map(|i| PhotoRecord {
                    id: (page as u64) * 1000 + i as u64,
                    url: format!("mock://{page}/{i}"),
                })
                .collect(),
            has_more,
        }
    }

    #[test]
    fn parse_full_page_with_continuation() {
        let body = r#"{
            "page": 1,
            "per_page": 2,
            "photos": [
                {"id": 101, "width": 4000, "src": {"original": "https://images.example/101.jpeg", "large": "x"}},
                {"id": 102, "src": {"original": "https://images.example/102.jpeg"}}
            ],
            "total_results": 4000,
            "next_page": "https://api.pexels.com/v1/search/?page=2&per_page=2&query=cat"
        }"#;
        let page = parse_search_page(200, body).unwrap();
        assert_eq!(page.photos.len(), 2);
        assert_eq!(page.photos[0].id, 101);
        assert_eq!(page.photos[1].url, "https://images.example/102.jpeg");
        assert!(page.has_more);
    }

    #[test]
    fn parse_last_page_without_next() {
        let body = r#"{"photos": [{"id": 1, "src": {"original": "u"}}]}"#;
        let page = parse_search_page(200, body).unwrap();
        assert_eq!(page.photos.len(), 1);
        assert!(!page.has_more);
    }

    #[test]
    fn parse_null_or_false_next_page_is_not_continuation() {
        for next in ["null", "false", "\"\""] {
            let body = format!(r#"{{"photos": [{{"src": {{"original": "u"}}}}], "next_page": {next}}}"#);
            assert!(!parse_search_page(200, &body).unwrap().has_more, "{next}");
        }
    }

    #[test]
    fn parse_missing_photos_is_empty_page() {
        let page = parse_search_page(200, r#"{"total_results": 0}"#).unwrap();
        assert!(page.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn parse_error_json_with_bad_status_is_empty_page() {
        let page = parse_search_page(401, r#"{"error": "Unauthorized"}"#).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn parse_drops_records_without_original() {
        let body = r#"{"photos": [
            {"id": 1, "src": {"medium": "m"}},
            {"id": 2},
            {"id": 3, "src": {"original": ""}},
            {"id": 4, "src": {"original": "keep"}}
        ]}"#;
        let page = parse_search_page(200, body).unwrap();
        assert_eq!(
            page.photos,
            vec![PhotoRecord {
                id: 4,
                url: "keep".into()
            }]
        );
    }

    #[test]
    fn parse_html_error_page_is_status_error() {
        let err = parse_search_page(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SearchError::Status { status: 502 }));
    }

    #[test]
    fn parse_garbage_with_ok_status_is_malformed() {
        let err = parse_search_page(200, "not json").unwrap_err();
        assert!(matches!(err, SearchError::Malformed(_)));
    }

    fn query_pairs(request: &reqwest::blocking::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn request_carries_query_paging_and_key() {
        let client = PexelsClient::new(
            Client::new(),
            "https://api.pexels.com/v1/search",
            "secret-key",
        );
        let request = client.request("cat", 3, 15).build().unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/v1/search");
        assert_eq!(
            query_pairs(&request),
            vec![
                ("query".to_string(), "cat".to_string()),
                ("page".to_string(), "3".to_string()),
                ("per_page".to_string(), "15".to_string()),
            ]
        );
        assert_eq!(request.headers()[AUTHORIZATION], "secret-key");
    }

    #[test]
    fn request_encodes_keyword() {
        let client = PexelsClient::new(Client::new(), "https://api.pexels.com/v1/search", "k");
        let request = client.request("sea otter/è", 1, 15).build().unwrap();

        let raw = request.url().query().unwrap();
        assert!(raw.starts_with("query=sea+otter%2F%C3%A8&"), "{raw}");
        assert_eq!(query_pairs(&request)[0].1, "sea otter/è");
    }

    #[test]
    fn mock_serves_pages_in_order() {
        let search = MockSearch::with_pages(vec![page_of(1, 2, true)]);
        assert_eq!(search.search("cat", 1, 15).unwrap().photos.len(), 2);
        assert!(search.search("cat", 2, 15).unwrap().is_empty());
        assert_eq!(search.requested_pages(), vec![1, 2]);
    }
}
