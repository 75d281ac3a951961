use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use crate::api::{
    validate_code, Authority, CodeRule, CodeType, FetchedResponse, HttpFetcher, LookupError,
    ReqwestFetcher,
};
use crate::config::config::Config;

/// ICAO location indicator endpoint (Doc 7910)
pub const DEFAULT_BASE_URL: &str =
    "https://v4p4sz5ijk.execute-api.us-east-1.amazonaws.com/anbdata/airports/locations/doc7910";

/// Resolves airport codes into JSON records through the ICAO data API.
///
/// Every lookup is one blocking round trip: validate the code, build the
/// request, fetch it and strip the array brackets off the answer. The client
/// holds no mutable state, so clones and concurrent calls are independent.
#[derive(Clone)]
pub struct AirportLookupClient {
    api_key: String,
    base_url: String,
    fetcher: Arc<dyn HttpFetcher>,
}

impl fmt::Debug for AirportLookupClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirportLookupClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub struct AirportLookupClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    fetcher: Option<Arc<dyn HttpFetcher>>,
}

impl AirportLookupClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send requests through `fetcher` instead of a fresh reqwest client.
    /// A configured timeout is ignored in that case.
    pub fn fetcher(mut self, fetcher: Arc<dyn HttpFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn build(self) -> Result<AirportLookupClient, LookupError> {
        // Reject an unusable base url now rather than on the first lookup
        Url::parse(&self.base_url)?;

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(ReqwestFetcher::with_timeout(self.timeout)?),
        };

        Ok(AirportLookupClient {
            api_key: self.api_key,
            base_url: self.base_url,
            fetcher,
        })
    }
}

impl AirportLookupClient {
    /// Client against the public endpoint. The key is not checked.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            fetcher: Arc::new(ReqwestFetcher::new()),
        }
    }

    pub fn builder(api_key: &str) -> AirportLookupClientBuilder {
        AirportLookupClientBuilder {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            fetcher: None,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config
            .api
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("No API key configured"))?;

        let client = Self::builder(api_key)
            .base_url(config.api.base_url.clone())
            .timeout(config.api.timeout())
            .build()?;
        Ok(client)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up an airport by its 4 character ICAO code.
    ///
    /// Fails with [`LookupError::InvalidArgument`] before any request is made
    /// when the code is not 4 characters long.
    pub fn find_by_icao(&self, code: &str) -> Result<String, LookupError> {
        self.lookup(code, CodeRule::Icao.tag(), CodeType::Icao, "Invalid ICAO Code")
    }

    /// Look up an airport by its 3 character IATA code.
    pub fn find_by_iata(&self, code: &str) -> Result<String, LookupError> {
        self.lookup(code, CodeRule::Iata.tag(), CodeType::Iata, "Invalid IATA Code")
    }

    /// Look up an airport by a location identifier issued by `authority`.
    pub fn find_by_lid(&self, code: &str, authority: Authority) -> Result<String, LookupError> {
        let message = format!("Invalid {} LID Code", authority);
        self.lookup(code, authority.rule().tag(), CodeType::Lid, &message)
    }

    /// The upstream has no image endpoint. The code is still validated so a
    /// bad code reports the same error as a lookup would.
    pub fn airport_image(&self, code: &str, code_type: CodeType) -> Result<Vec<u8>, LookupError> {
        if !code_type.accepts(code) {
            return Err(LookupError::invalid(format!("Invalid {} Code", code_type)));
        }
        Err(LookupError::NotImplemented("Airport image lookup"))
    }

    fn lookup(
        &self,
        code: &str,
        rule_tag: &str,
        code_type: CodeType,
        invalid_message: &str,
    ) -> Result<String, LookupError> {
        if !validate_code(rule_tag, code) {
            debug!(target: "airport_api", "Rejected {} code {:?}", code_type, code);
            return Err(LookupError::invalid(invalid_message));
        }

        let url = self.build_api_call(code, code_type.as_str())?;
        let body = self.fetch_text(&url)?;
        Ok(unwrap_record(&body))
    }

    /// Embeds the key and the upper-cased code in the base url.
    ///
    /// IATA and LID requests use the same parameters as ICAO ones; the
    /// endpoint takes any location indicator in `airports`.
    fn build_api_call(&self, code: &str, code_type: &str) -> Result<Url, LookupError> {
        let code_type: CodeType = code_type.parse()?;
        let code = code.to_uppercase();

        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("airports", &code)
            .append_pair("format", "json");

        debug!(
            target: "airport_api",
            "Built {} request for {} against {}", code_type, code, self.base_url
        );
        Ok(url)
    }

    fn fetch_text(&self, url: &Url) -> Result<String, LookupError> {
        let response = self.fetcher.get(url)?;
        check_response(&response)?;
        Ok(response.body)
    }
}

fn check_response(response: &FetchedResponse) -> Result<(), LookupError> {
    if response.status == 200 {
        return Ok(());
    }

    warn!(
        target: "airport_api",
        "HTTP Error: {} {}", response.status, response.reason
    );
    Err(LookupError::Http {
        code: response.status,
        message: response.reason.clone(),
    })
}

/// Turns the single element array the API answers with into a bare object by
/// deleting every bracket. This is textual, not JSON aware: a multi element
/// array or a bracket inside a string value comes out mangled.
fn unwrap_record(json: &str) -> String {
    json.chars().filter(|c| *c != '[' && *c != ']').collect()
}
