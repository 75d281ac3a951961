use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use super::error::LookupError;

/// Status line and body of one upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl FetchedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            body: body.into(),
        }
    }
}

/// Issues a single blocking GET and hands back whatever came back.
///
/// Status checking is left to the caller so that every transport behaves
/// the same way on a non-200 answer.
pub trait HttpFetcher: Send + Sync {
    fn get(&self, url: &Url) -> Result<FetchedResponse, LookupError>;
}

/// [`HttpFetcher`] backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Wrap an already configured client
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    /// Without a timeout the client's own default applies
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, LookupError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// The reason phrase the server sent. hyper only keeps it when it differs
/// from the canonical one, so fall back to that and then to the bare code.
fn reason_phrase(response: &reqwest::blocking::Response) -> String {
    if let Some(phrase) = response.extensions().get::<hyper::ext::ReasonPhrase>() {
        return String::from_utf8_lossy(phrase.as_bytes()).into_owned();
    }
    let status = response.status();
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

impl HttpFetcher for ReqwestFetcher {
    fn get(&self, url: &Url) -> Result<FetchedResponse, LookupError> {
        // The response owns the connection and is dropped on every path out
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        debug!(target: "airport_api", "Upstream answered {}", status);

        let reason = reason_phrase(&response);

        let body = if status == reqwest::StatusCode::OK {
            response.text()?
        } else {
            String::new()
        };

        Ok(FetchedResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}
