//! Have I Been Pwned adapter (breached-account lookups).
//!
//! Implements the `bw-core` BreachApi port over the HIBP v3 REST API.

use async_trait::async_trait;
use reqwest::StatusCode;

use bw_core::{
    breach::{BreachApi, BreachRecord, LookupRequest, LookupResult},
    config::HibpConfig,
    errors::Error,
    Result,
};

const API_KEY_HEADER: &str = "hibp-api-key";

#[derive(Clone, Debug)]
pub struct HibpClient {
    api_key: String,
    api_base: String,
    truncate_response: bool,
    http: reqwest::Client,
}

impl HibpClient {
    pub fn new(cfg: &HibpConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| Error::External(format!("hibp client build error: {e}")))?;
        Ok(Self {
            api_key: cfg.api_key.clone(),
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            truncate_response: cfg.truncate_response,
            http,
        })
    }

    /// The email goes into the path exactly as the user typed it (after trimming).
    pub fn breached_account_url(&self, email: &str) -> String {
        let mut url = format!("{}/api/v3/breachedaccount/{email}", self.api_base);
        if !self.truncate_response {
            url.push_str("?truncateResponse=false");
        }
        url
    }
}

#[async_trait]
impl BreachApi for HibpClient {
    async fn breached_account(&self, request: &LookupRequest) -> Result<LookupResult> {
        let resp = self
            .http
            .get(self.breached_account_url(request.email()))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| Error::External(format!("hibp request error: {e}")))?;

        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "hibp response");

        match status {
            StatusCode::OK => {
                let records: Vec<BreachRecord> = resp
                    .json()
                    .await
                    .map_err(|e| Error::External(format!("hibp json error: {e}")))?;
                Ok(LookupResult::Breaches(records))
            }
            StatusCode::NOT_FOUND => Ok(LookupResult::NoBreach),
            other => {
                let body = resp
                    .text()
                    .await
                    .map_err(|e| Error::External(format!("hibp body error: {e}")))?;
                Ok(LookupResult::ApiError {
                    status: other.as_u16(),
                    body,
                })
            }
        }
    }
}
