//! Keyword translation.
//!
//! [`Translator`] is a single-call adapter: one request, no retry, and any
//! failure is a [`TranslationError`] that ends the run. [`GoogleTranslator`]
//! talks to the public `translate_a/single` endpoint used by browser
//! extensions (`client=gtx`), which needs no credential.

use reqwest::blocking::{Client, RequestBuilder};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("translation service unreachable: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translation service returned status {status}")]
    Status { status: u16 },
    #[error("malformed translation response: {0}")]
    Malformed(String),
}

pub trait Translator {
    /// Translate `text` from `source` to `target` (ISO 639-1 codes).
    fn translate(&self, text: &str, source: &str, target: &str)
    -> Result<String, TranslationError>;
}

pub struct GoogleTranslator {
    http: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// The GET for one translation, not yet sent.
    pub fn request(&self, text: &str, source: &str, target: &str) -> RequestBuilder {
        self.http.get(&self.endpoint).query(&[
            ("client", "gtx"),
            ("sl", source),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ])
    }
}

impl Translator for GoogleTranslator {
    fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        debug!(text, source, target, "translating");
        let response = self.request(text, source, target).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        let translated = parse_translation(&body)?;
        debug!(%translated, "translated");
        Ok(translated)
    }
}

/// Extract the translated text from a `translate_a/single` response.
///
/// The body is a nested array whose first element lists sentence segments;
/// each segment starts with its translated text.
pub fn parse_translation(body: &str) -> Result<String, TranslationError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| TranslationError::Malformed(e.to_string()))?;
    let segments = value
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslationError::Malformed("missing segment list".into()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();
    let text = text.trim();
    if text.is_empty() {
        return Err(TranslationError::Malformed("empty translation".into()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock translator answering from a fixed result and recording calls.
    pub struct MockTranslator {
        pub answer: Result<String, u16>,
        pub calls: Mutex<Vec<(String, String, String)>>,
    }

    impl MockTranslator {
        pub fn answering(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                answer: Err(status),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Translator for MockTranslator {
        fn translate(
            &self,
            text: &str,
            source: &str,
            target: &str,
        ) -> Result<String, TranslationError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.into(), source.into(), target.into()));
            match &self.answer {
                Ok(answer) => Ok(answer.clone()),
                Err(status) => Err(TranslationError::Status { status: *status }),
            }
        }
    }

    #[test]
    fn request_uses_gtx_parameters() {
        let translator = GoogleTranslator::new(
            Client::new(),
            "https://translate.googleapis.com/translate_a/single",
        );
        let request = translator.request("고양이", "ko", "en").build().unwrap();

        assert_eq!(request.url().path(), "/translate_a/single");
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("client".to_string(), "gtx".to_string()),
                ("sl".to_string(), "ko".to_string()),
                ("tl".to_string(), "en".to_string()),
                ("dt".to_string(), "t".to_string()),
                ("q".to_string(), "고양이".to_string()),
            ]
        );
        let raw = request.url().query().unwrap();
        assert!(raw.ends_with("q=%EA%B3%A0%EC%96%91%EC%9D%B4"), "{raw}");
    }

    #[test]
    fn parse_single_segment() {
        let body = r#"[[["cat","고양이",null,null,10]],null,"ko",null,null,null,1.0,[],[["ko"],null,[1.0],["ko"]]]"#;
        assert_eq!(parse_translation(body).unwrap(), "cat");
    }

    #[test]
    fn parse_joins_segments() {
        let body = r#"[[["Hello. ","안녕하세요.",null,null,3],["Nice day","좋은 날",null,null,3]],null,"ko"]"#;
        assert_eq!(parse_translation(body).unwrap(), "Hello. Nice day");
    }

    #[test]
    fn parse_trims_whitespace() {
        let body = r#"[[[" sea otter ","해달",null,null,1]]]"#;
        assert_eq!(parse_translation(body).unwrap(), "sea otter");
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(matches!(
            parse_translation("<html>"),
            Err(TranslationError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_unexpected_shape() {
        assert!(parse_translation(r#"{"text": "cat"}"#).is_err());
        assert!(parse_translation("[null]").is_err());
    }

    #[test]
    fn parse_rejects_empty_translation() {
        assert!(parse_translation(r#"[[["","고양이"]]]"#).is_err());
        assert!(parse_translation("[[]]").is_err());
    }

    #[test]
    fn mock_records_language_pair() {
        let translator = MockTranslator::answering("cat");
        assert_eq!(translator.translate("고양이", "ko", "en").unwrap(), "cat");
        let calls = translator.calls.lock().unwrap();
        assert_eq!(calls[0], ("고양이".into(), "ko".into(), "en".into()));
    }
}
