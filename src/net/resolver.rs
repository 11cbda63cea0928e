use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;

#[cfg(test)]
use mockall::automock;

use crate::error::FilterError;

/// Public Google resolver speaking the DNS-over-HTTPS JSON API
pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.google/resolve";

/// DNS status code for a successful query (NOERROR)
pub const STATUS_NOERROR: u32 = 0;

const DNS_JSON: &str = "application/dns-json";

/// The part of a DoH JSON answer we care about
#[derive(Debug, Deserialize, PartialEq)]
pub struct DohResponse {
    #[serde(rename = "Status")]
    pub status: u32,
}

/// DNS-over-HTTPS lookup abstraction for testing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DohResolver: Send + Sync + 'static {
    /// Query the A record of `domain` and return the DNS status code
    async fn query_status(&self, domain: &str) -> Result<u32, FilterError>;
}

/// Production resolver talking to a JSON DoH endpoint over HTTPS
pub struct HttpDohResolver {
    client: Client,
    endpoint: String,
}

impl HttpDohResolver {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FilterError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FilterError::HttpClient)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl DohResolver for HttpDohResolver {
    /// Send `GET <endpoint>?name=<domain>&type=A` and read the `Status` field
    ///
    /// # Returns
    /// * `Ok(status)` - The DNS response code reported by the resolver
    /// * `Err(FilterError)` - Transport failure, non-2xx HTTP status, or a body
    ///   that is not DoH JSON
    async fn query_status(&self, domain: &str) -> Result<u32, FilterError> {
        let request_err = |source| FilterError::LookupRequest {
            domain: domain.to_string(),
            source,
        };

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("name", domain), ("type", "A")])
            .header(ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(request_err)?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(FilterError::LookupHttp {
                domain: domain.to_string(),
                status: http_status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_err)?;
        let parsed: DohResponse =
            serde_json::from_str(&body).map_err(|source| FilterError::LookupMalformed {
                domain: domain.to_string(),
                source,
            })?;
        Ok(parsed.status)
    }
}
