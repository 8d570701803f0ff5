//! Ranking fetcher - one POST to the upstream server action per run
//!
//! The endpoint is a server-rendered page whose data channel is reached by
//! posting the action arguments with a `next-action` header and a browser
//! user agent. The response is a prefixed text stream, not JSON; see
//! `extract.rs`.

use super::extract::PayloadExtractor;
use super::types::RankingPayload;
use crate::config::RankingConfig;
use crate::errors::FetchError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Header carrying the server action identifier
const ACTION_HEADER: &str = "next-action";

/// Maximum body excerpt included in status errors
const ERROR_BODY_LIMIT: usize = 200;

/// Source of ranking payloads
#[async_trait]
pub trait RankingSource: Send + Sync {
    async fn fetch(&self) -> Result<RankingPayload, FetchError>;
}

/// Action arguments, sent as a one-element JSON array
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingQuery {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub sort: String,
    pub search: String,
    pub is_completed: bool,
    pub except_completed: bool,
}

impl RankingQuery {
    /// Newest running sales: completed ones are excluded
    pub fn from_config(config: &RankingConfig) -> Self {
        Self {
            page: config.page,
            page_size: config.page_size,
            sort: config.sort.clone(),
            search: config.search.clone(),
            is_completed: false,
            except_completed: true,
        }
    }
}

/// HTTP client for the ranking endpoint
pub struct RankingClient {
    client: Client,
    url: String,
    extractor: PayloadExtractor,
    query: RankingQuery,
}

impl RankingClient {
    pub fn new(config: &RankingConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(ACTION_HEADER),
            HeaderValue::from_str(&config.action_id)
                .map_err(|e| FetchError::Client(format!("invalid action id: {}", e)))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| FetchError::Client(format!("invalid user agent: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let extractor = PayloadExtractor::new(&config.payload_marker)
            .map_err(|e| FetchError::Client(format!("invalid payload marker: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            extractor,
            query: RankingQuery::from_config(config),
        })
    }

    /// Parse a raw response body into the embedded payload
    pub fn parse_body(
        body: &str,
        extractor: &PayloadExtractor,
    ) -> Result<RankingPayload, FetchError> {
        let object = extractor
            .extract(body)
            .ok_or_else(|| FetchError::MarkerNotFound {
                marker: format!("{}:", extractor.marker()),
                body_len: body.len(),
            })?;

        Ok(serde_json::from_str::<RankingPayload>(object)?)
    }
}

#[async_trait]
impl RankingSource for RankingClient {
    async fn fetch(&self) -> Result<RankingPayload, FetchError> {
        logger::debug(
            LogTag::Fetcher,
            &format!(
                "POST {} (page={}, pageSize={}, sort={})",
                self.url, self.query.page, self.query.page_size, self.query.sort
            ),
        );

        let response = self
            .client
            .post(&self.url)
            .json(&[&self.query])
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::Request {
            url: self.url.clone(),
            message: format!("failed to read body: {}", e),
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        logger::verbose(LogTag::Fetcher, &format!("Raw ranking body:\n{}", body));

        let payload = Self::parse_body(&body, &self.extractor)?;
        logger::debug(
            LogTag::Fetcher,
            &format!(
                "Parsed ranking payload ({} bytes, {} entries)",
                body.len(),
                payload
                    .data
                    .as_ref()
                    .and_then(|d| d.as_array())
                    .map(|a| a.len())
                    .unwrap_or(0)
            ),
        );
        Ok(payload)
    }
}
