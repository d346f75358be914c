use std::time::Duration;

use autofill_logging::autofill_debug;
use futures_util::StreamExt;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use crate::decode::decode_text;
use crate::{FailureKind, LookupError};

/// Path of the title suggestion endpoint, relative to the endpoint base.
pub const SHORT_TITLE_PATH: &str = "/short-title";
/// Query key carrying the candidate URL.
pub const WEBPAGE_PARAM: &str = "webpage";

/// Bytes left as-is by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 64 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait TitleLookup: Send + Sync {
    /// Asks for a suggested title for `webpage`. Only a 200 response yields `Ok`.
    async fn lookup(&self, webpage: &str) -> Result<String, LookupError>;
}

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// `<endpoint>/short-title?webpage=<encoded webpage>`.
pub fn short_title_url(endpoint: &Url, webpage: &str) -> Result<Url, LookupError> {
    let mut url = endpoint
        .join(SHORT_TITLE_PATH)
        .map_err(|err| LookupError::new(FailureKind::InvalidUrl, err.to_string()))?;
    let query = format!("{WEBPAGE_PARAM}={}", encode_uri_component(webpage));
    url.set_query(Some(&query));
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ReqwestTitleLookup {
    endpoint: Url,
    settings: LookupSettings,
    client: reqwest::Client,
}

impl ReqwestTitleLookup {
    pub fn new(endpoint: Url, settings: LookupSettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| LookupError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            endpoint,
            settings,
            client,
        })
    }
}

#[async_trait::async_trait]
impl TitleLookup for ReqwestTitleLookup {
    async fn lookup(&self, webpage: &str) -> Result<String, LookupError> {
        let request_url = short_title_url(&self.endpoint, webpage)?;
        autofill_debug!("RequestURL: {}", request_url);

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(LookupError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(LookupError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(decode_text(&bytes, content_type.as_deref()).text)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        return LookupError::new(FailureKind::Timeout, err.to_string());
    }
    LookupError::new(FailureKind::Network, err.to_string())
}
